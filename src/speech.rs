use std::env;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Mutex;

use thiserror::Error;
use tokio::process::{Child, Command};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

const BASE_WPM: f32 = 175.0;

const PROGRAMS: &[&str] = &["espeak-ng", "espeak", "say"];

// say picks voices by name; one stock voice per language.
const SAY_VOICES: &[(&str, &str)] = &[
    ("ar", "Maged"),
    ("de", "Anna"),
    ("el", "Melina"),
    ("en", "Samantha"),
    ("es", "Monica"),
    ("fr", "Thomas"),
    ("he", "Carmit"),
    ("hi", "Lekha"),
    ("id", "Damayanti"),
    ("it", "Alice"),
    ("ja", "Kyoko"),
    ("ko", "Yuna"),
    ("nl", "Xander"),
    ("pl", "Zosia"),
    ("pt", "Luciana"),
    ("ru", "Milena"),
    ("sv", "Alva"),
    ("th", "Kanya"),
    ("tr", "Yelda"),
    ("zh", "Ting-Ting"),
];

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Speech is not available")]
    Unavailable,
    #[error("Failed to start speech program")]
    SpawnFailed(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Utterance {
    pub fn new(text: &str, lang: &str) -> Self {
        Self {
            text: text.to_string(),
            lang: lang.to_string(),
            rate: 0.95,
            pitch: 1.0,
        }
    }
}

pub trait Speech: Send + Sync {
    fn available(&self) -> bool;

    /// Stops whatever is being spoken. Nothing happens if silent.
    fn cancel(&self);

    fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError>;
}

pub struct NoSpeech;

impl Speech for NoSpeech {
    fn available(&self) -> bool {
        false
    }

    fn cancel(&self) {}

    fn speak(&self, _: &Utterance) -> Result<(), SpeechError> {
        Err(SpeechError::Unavailable)
    }
}

pub struct CommandSpeech {
    program: PathBuf,
    current: Mutex<Option<oneshot::Sender<()>>>,
}

impl CommandSpeech {
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            current: Mutex::new(None),
        }
    }

    fn program_name(&self) -> &str {
        self.program
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

pub fn speech_args(program: &str, utterance: &Utterance) -> Vec<String> {
    let wpm = (BASE_WPM * utterance.rate).round() as u32;
    match program {
        "say" => {
            let mut args = Vec::new();
            if let Some((_, voice)) = SAY_VOICES.iter().find(|(lang, _)| *lang == utterance.lang) {
                args.push("-v".to_string());
                args.push(voice.to_string());
            }
            args.extend(["-r".to_string(), wpm.to_string(), utterance.text.clone()]);
            args
        }
        _ => {
            let pitch = (50.0 * utterance.pitch).clamp(0.0, 99.0).round() as u32;
            vec![
                "-v".to_string(),
                utterance.lang.clone(),
                "-s".to_string(),
                wpm.to_string(),
                "-p".to_string(),
                pitch.to_string(),
                "--".to_string(),
                utterance.text.clone(),
            ]
        }
    }
}

impl Speech for CommandSpeech {
    fn available(&self) -> bool {
        true
    }

    fn cancel(&self) {
        let mut current = match self.current.lock() {
            Ok(current) => current,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(stop) = current.take() {
            // fails only when the utterance already ended
            if stop.send(()).is_ok() {
                debug!("Cancelling current utterance");
            }
        }
    }

    fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        let child = Command::new(&self.program)
            .args(speech_args(self.program_name(), utterance))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;
        let (stop, stopped) = oneshot::channel();
        tokio::spawn(supervise(child, stopped));

        let mut current = match self.current.lock() {
            Ok(current) => current,
            Err(poisoned) => poisoned.into_inner(),
        };
        *current = Some(stop);
        Ok(())
    }
}

/// Waits for the speech program to exit, killing it if `stop` fires first.
/// Returns true when it was killed.
async fn supervise(mut child: Child, stop: oneshot::Receiver<()>) -> bool {
    tokio::select! {
        status = child.wait() => {
            match status {
                Ok(status) => debug!("Speech program exited: {}", status),
                Err(e) => warn!("Failed to wait for speech program: {}", e),
            }
            false
        }
        _ = stop => {
            if let Err(e) = child.kill().await {
                warn!("Failed to stop speech program: {}", e);
            }
            true
        }
    }
}

fn find_program(name: &str, path: &str) -> Option<PathBuf> {
    env::split_paths(path)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

pub fn detect(enabled: bool) -> Box<dyn Speech> {
    if !enabled {
        info!("Speech disabled by configuration");
        return Box::new(NoSpeech);
    }
    let path = env::var("PATH").unwrap_or_default();
    match PROGRAMS.iter().find_map(|name| find_program(name, &path)) {
        Some(program) => {
            info!("Using {} for speech", program.display());
            Box::new(CommandSpeech::new(program))
        }
        None => {
            info!("No speech program found");
            Box::new(NoSpeech)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utterance_defaults() {
        let utterance = Utterance::new("hola", "es");
        assert_eq!(utterance.rate, 0.95);
        assert_eq!(utterance.pitch, 1.0);
    }

    #[test]
    fn espeak_args_carry_language_and_rate() {
        let args = speech_args("espeak-ng", &Utterance::new("hola", "es"));
        assert_eq!(args, ["-v", "es", "-s", "166", "-p", "50", "--", "hola"]);
    }

    #[test]
    fn say_args_pick_voice_for_language() {
        let args = speech_args("say", &Utterance::new("hola", "es"));
        assert_eq!(args, ["-v", "Monica", "-r", "166", "hola"]);
    }

    #[test]
    fn say_args_without_known_voice_use_default() {
        let args = speech_args("say", &Utterance::new("salam", "fa"));
        assert_eq!(args, ["-r", "166", "salam"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stop_kills_running_program() {
        let child = Command::new("sleep").arg("30").kill_on_drop(true).spawn().expect("sleep");
        let (stop, stopped) = oneshot::channel();
        let supervisor = tokio::spawn(supervise(child, stopped));
        stop.send(()).expect("supervisor alive");
        let killed = tokio::time::timeout(std::time::Duration::from_secs(5), supervisor)
            .await
            .expect("supervisor finished")
            .expect("join");
        assert!(killed);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn finished_program_is_reaped_without_stop() {
        let child = Command::new("true").spawn().expect("true");
        let (stop, stopped) = oneshot::channel();
        let killed = tokio::time::timeout(std::time::Duration::from_secs(5), supervise(child, stopped))
            .await
            .expect("supervisor finished");
        assert!(!killed);
        assert!(stop.send(()).is_err());
    }

    #[tokio::test]
    async fn missing_program_fails_to_spawn() {
        let speech = CommandSpeech::new(PathBuf::from("/nonexistent/espeak-ng"));
        assert!(matches!(
            speech.speak(&Utterance::new("hola", "es")),
            Err(SpeechError::SpawnFailed(_))
        ));
        speech.cancel();
    }

    #[test]
    fn disabled_speech_is_unavailable() {
        let speech = detect(false);
        assert!(!speech.available());
        assert!(matches!(
            speech.speak(&Utterance::new("x", "en")),
            Err(SpeechError::Unavailable)
        ));
    }

    #[test]
    fn program_lookup_misses_empty_path() {
        assert!(find_program("espeak-ng", "").is_none());
    }
}
