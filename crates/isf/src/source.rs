use std::fs;

use reqwest::blocking::Client;
use tracing::debug;

use crate::SourceHandle;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read shader at {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch shader from {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("shader source at {0} is empty")]
    Empty(String),
}

/// Loads the shader body the handle points at, as text.
///
/// Local handles read the file; remote handles perform one blocking GET
/// with status checking. The text is returned untouched, trailing
/// whitespace included.
pub fn load_source(handle: &SourceHandle) -> Result<String, SourceError> {
    let text = match handle {
        SourceHandle::LocalFile(path) => {
            fs::read_to_string(path).map_err(|source| SourceError::Read {
                path: path.display().to_string(),
                source,
            })?
        }
        SourceHandle::Remote(url) => fetch_remote(url)?,
    };

    if text.trim().is_empty() {
        return Err(SourceError::Empty(handle.to_string()));
    }
    Ok(text)
}

fn fetch_remote(url: &str) -> Result<String, SourceError> {
    debug!(%url, "fetching shader source");
    let client = Client::builder().build().map_err(|source| SourceError::Fetch {
        url: url.to_string(),
        source,
    })?;
    let response = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(|source| SourceError::Fetch {
            url: url.to_string(),
            source,
        })?;
    response.text().map_err(|source| SourceError::Fetch {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_local_file_verbatim() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "void main() {{ gl_FragColor = vec4(TIME); }}\n").expect("write");

        let handle = SourceHandle::LocalFile(file.path().to_path_buf());
        let text = load_source(&handle).expect("load");
        assert_eq!(text, "void main() { gl_FragColor = vec4(TIME); }\n");
    }

    #[test]
    fn missing_file_reports_the_path() {
        let handle = SourceHandle::from_input("does/not/exist.fs");
        let err = load_source(&handle).expect_err("missing file");
        assert!(err.to_string().contains("does/not/exist.fs"));
    }

    #[test]
    fn blank_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "  \n\t\n").expect("write");

        let handle = SourceHandle::LocalFile(file.path().to_path_buf());
        assert!(matches!(
            load_source(&handle),
            Err(SourceError::Empty(_))
        ));
    }
}
