use clap::Parser;

/// Default frame rate for the preview loop.
pub const DEFAULT_FPS: f32 = 60.0;

#[derive(Parser, Debug)]
#[command(
    name = "isfview",
    author,
    version,
    about = "ISF shader preview harness"
)]
pub struct Cli {
    /// ISF fragment shader to render (a file path or an http(s) URL).
    #[arg(value_name = "SHADER")]
    pub shader: String,

    /// Frames per second for the draw loop.
    #[arg(long, value_name = "FPS", value_parser = parse_fps, default_value_t = DEFAULT_FPS)]
    pub fps: f32,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_fps(value: &str) -> Result<f32, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("fps must not be empty".to_string());
    }
    let fps: f32 = trimmed
        .parse()
        .map_err(|_| format!("invalid fps '{trimmed}'"))?;
    if !fps.is_finite() || fps <= 0.0 {
        return Err(format!("fps must be a positive number, got '{trimmed}'"));
    }
    Ok(fps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_fps() {
        assert_eq!(parse_fps("60").unwrap(), 60.0);
        assert_eq!(parse_fps(" 23.5 ").unwrap(), 23.5);
    }

    #[test]
    fn rejects_non_positive_fps() {
        assert!(parse_fps("0").is_err());
        assert!(parse_fps("-30").is_err());
        assert!(parse_fps("fast").is_err());
        assert!(parse_fps("inf").is_err());
        assert!(parse_fps("").is_err());
    }
}
