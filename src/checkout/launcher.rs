use std::{io::ErrorKind, process::Stdio};

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LaunchError {
    #[error("no application handles `{scheme}` links")]
    Unavailable { scheme: String },
    #[error("failed to open deep link: {0}")]
    Failed(String),
}

/// Hands a deep link to whatever the host uses to open URLs.
#[automock]
#[async_trait]
pub trait DeepLinkLauncher: Send + Sync {
    async fn open(&self, url: &str) -> Result<(), LaunchError>;
}

/// Opens links by running the host opener (`xdg-open`, `open`, ...) with the
/// URL as its only argument.
#[derive(Debug, Clone)]
pub struct CommandLauncher {
    program: String,
}

impl CommandLauncher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

fn scheme_of(url: &str) -> String {
    url.split_once(':')
        .map_or(url, |(scheme, _)| scheme)
        .to_string()
}

#[async_trait]
impl DeepLinkLauncher for CommandLauncher {
    async fn open(&self, url: &str) -> Result<(), LaunchError> {
        let status = Command::new(&self.program)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => {
                tracing::debug!(program = %self.program, %status, "opener refused deep link");
                Err(LaunchError::Unavailable {
                    scheme: scheme_of(url),
                })
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Err(LaunchError::Unavailable {
                scheme: scheme_of(url),
            }),
            Err(err) => Err(LaunchError::Failed(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_is_text_before_colon() {
        assert_eq!(scheme_of("whatsapp://send?phone=55"), "whatsapp");
        assert_eq!(scheme_of("plain"), "plain");
    }

    #[tokio::test]
    async fn missing_opener_means_unavailable() {
        let launcher = CommandLauncher::new("greenmarket-no-such-opener");
        let err = launcher.open("whatsapp://send?phone=55").await.unwrap_err();
        assert_eq!(
            err,
            LaunchError::Unavailable {
                scheme: "whatsapp".into()
            }
        );
    }
}
