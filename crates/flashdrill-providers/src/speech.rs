//! Google `translate_tts` speaker and the cue that plays its audio.

use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::Url;

use flashdrill_core::traits::{Cue, SilentCue, Speaker};

use crate::error::ProviderError;
use crate::google::TIMEOUT_SECS;

const SPEECH_PATH: &str = "translate_tts";

/// Speaker that fetches MP3 speech and hands it to a command-line player.
pub struct GoogleSpeaker {
    base_url: String,
    player: Vec<String>,
    client: Client,
}

impl GoogleSpeaker {
    /// `player` is the program followed by its leading arguments; the audio
    /// file path is appended as the last argument.
    pub fn new(base_url: &str, player: Vec<String>) -> Result<Self> {
        if player.is_empty() {
            return Err(ProviderError::Player("no player command configured".into()).into());
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            player,
            client,
        })
    }

    fn url(&self, text: &str, language: &str) -> Result<Url> {
        let url = Url::parse_with_params(
            &format!("{}/{SPEECH_PATH}", self.base_url),
            &[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", text),
            ],
        )?;
        Ok(url)
    }
}

impl Speaker for GoogleSpeaker {
    fn speak(&self, text: &str, language: &str) -> Box<dyn Cue> {
        if text.trim().is_empty() {
            return Box::new(SilentCue);
        }
        match self.url(text, language) {
            Ok(url) => Box::new(AudibleCue {
                url,
                player: self.player.clone(),
                client: self.client.clone(),
            }),
            Err(e) => {
                tracing::warn!("cannot build speech request for {text:?}: {e}");
                Box::new(SilentCue)
            }
        }
    }
}

/// Spoken text, fetched and played on demand.
pub struct AudibleCue {
    url: Url,
    player: Vec<String>,
    client: Client,
}

impl AudibleCue {
    fn fetch(&self) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .map_err(ProviderError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Http {
                status: status.as_u16(),
                url: self.url.to_string(),
            }
            .into());
        }
        Ok(response.bytes().map_err(ProviderError::from)?.to_vec())
    }
}

/// Run `player` on `file` and wait for it to exit.
pub fn run_player(player: &[String], file: &Path) -> Result<()> {
    let Some((program, args)) = player.split_first() else {
        return Err(ProviderError::Player("no player command configured".into()).into());
    };

    let status = Command::new(program)
        .args(args)
        .arg(file)
        .status()
        .map_err(|e| ProviderError::Player(format!("cannot run {program}: {e}")))?;

    if !status.success() {
        return Err(ProviderError::Player(format!("{program} exited with {status}")).into());
    }
    Ok(())
}

impl Cue for AudibleCue {
    fn play(&self) -> Result<()> {
        let audio = self.fetch()?;
        tracing::debug!("fetched {} bytes of speech", audio.len());

        let mut file = tempfile::Builder::new()
            .prefix("flashdrill-")
            .suffix(".mp3")
            .tempfile()
            .context("failed to create audio file")?;
        file.write_all(&audio)
            .context("failed to write audio file")?;
        file.flush()?;

        run_player(&self.player, file.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn player(program: &str) -> Vec<String> {
        vec![program.to_string()]
    }

    #[test]
    fn needs_a_player() {
        assert!(GoogleSpeaker::new("http://localhost:1", Vec::new()).is_err());
    }

    #[test]
    fn blank_text_is_silent() {
        let speaker = GoogleSpeaker::new("http://127.0.0.1:9", player("true")).unwrap();
        assert!(speaker.speak("  ", "en").play().is_ok());
    }

    #[test]
    fn speech_url() {
        let speaker = GoogleSpeaker::new("http://localhost:1/", player("true")).unwrap();
        let url = speaker.url("добрый день", "ru").unwrap();
        assert!(url.as_str().starts_with("http://localhost:1/translate_tts?ie=UTF-8"));
        assert_eq!(
            url.query_pairs().find(|(k, _)| k == "q").map(|(_, v)| v.into_owned()),
            Some("добрый день".to_string())
        );
    }

    #[cfg(unix)]
    #[test]
    fn player_exit_status() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(run_player(&player("true"), file.path()).is_ok());

        let err = run_player(&player("false"), file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::Player(_))
        ));

        let err = run_player(&player("no-such-player-binary"), file.path()).unwrap_err();
        assert!(err.to_string().contains("cannot run"));
    }

    #[cfg(unix)]
    #[tokio::test(flavor = "multi_thread")]
    async fn fetches_and_plays() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .and(query_param("tl", "ru"))
            .and(query_param("q", "вино"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xFB, 0x90]))
            .expect(1)
            .mount(&server)
            .await;

        let uri = server.uri();
        tokio::task::spawn_blocking(move || {
            let speaker = GoogleSpeaker::new(&uri, player("true")).unwrap();
            speaker.speak("вино", "ru").play()
        })
        .await
        .unwrap()
        .unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn error_status_fails_the_cue() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let uri = server.uri();
        let err = tokio::task::spawn_blocking(move || {
            let speaker = GoogleSpeaker::new(&uri, player("true")).unwrap();
            speaker.speak("hello", "en").play()
        })
        .await
        .unwrap()
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::Http { status: 503, .. })
        ));
    }
}
