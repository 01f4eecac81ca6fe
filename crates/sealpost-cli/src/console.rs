//! Console driver.
//!
//! Implements [`Driver`] for a non-interactive terminal session. User input is
//! a script built from command-line flags; rendering prints what changed since
//! the previous frame (notices, the loaded key, the ciphertext and mail link).
//! Key and result blocks are headed by the page's localized step titles.
//! The clipboard is a file when one is configured and unsupported otherwise.

use std::{
    collections::VecDeque,
    io::{self, Write},
    path::PathBuf,
    time::Instant,
};

use sealpost_app::{
    Driver, KeyResource, Notice, NoticeKind, Workflow, WorkflowEvent,
    markup::{Element, ElementKind, localize},
};
use sealpost_cache::Request;
use sealpost_core::{ClipboardError, FetchError, FileError, Language, Msg, Strings};
use thiserror::Error;

use crate::Upstream;

/// Console driver errors.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Writing to the console failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// What the console has already printed.
#[derive(Default)]
struct Shown {
    notice: Option<Notice>,
    fingerprint: Option<Vec<u8>>,
    ciphertext: bool,
    copied: bool,
}

/// Step headings, localized once per session.
struct Headings {
    key: String,
    result: String,
}

impl Headings {
    fn new(language: Language) -> Self {
        let mut elements = [
            Element::tagged(Msg::Step0Title.key(), ElementKind::Other),
            Element::tagged(Msg::Step2Title.key(), ElementKind::Other),
        ];
        let title = localize(&mut elements, &Strings::for_language(language));
        tracing::debug!(title, "console session");

        let [key, result] = elements;
        Self { key: key.text, result: result.text }
    }
}

/// Scripted console session.
pub struct ConsoleDriver<W: Write + Send> {
    upstream: Upstream,
    out: W,
    language: Language,
    script: VecDeque<WorkflowEvent>,
    copy_to: Option<PathBuf>,
    headings: Headings,
    shown: Shown,
}

impl<W: Write + Send> ConsoleDriver<W> {
    /// Create a driver that replays `script` and then quits.
    pub fn new(
        upstream: Upstream,
        out: W,
        language: Language,
        script: impl IntoIterator<Item = WorkflowEvent>,
    ) -> Self {
        Self {
            upstream,
            out,
            language,
            script: script.into_iter().collect(),
            copy_to: None,
            headings: Headings::new(language),
            shown: Shown::default(),
        }
    }

    /// Write copied text to `path`.
    #[must_use]
    pub fn with_clipboard_file(mut self, path: PathBuf) -> Self {
        self.copy_to = Some(path);
        self
    }

    fn print_notice(&mut self, notice: &Notice) -> io::Result<()> {
        let kind = match notice.kind {
            NoticeKind::Fatal => "fatal",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        };
        writeln!(self.out, "{kind}: {}", notice.message)?;
        if let Some(detail) = &notice.detail {
            writeln!(self.out, "  {detail}")?;
        }
        Ok(())
    }
}

impl<W: Write + Send> Driver for ConsoleDriver<W> {
    type Error = ConsoleError;
    type Instant = Instant;

    fn language(&self) -> Language {
        self.language
    }

    async fn poll_event(&mut self, _workflow: &Workflow) -> Result<Option<WorkflowEvent>, Self::Error> {
        Ok(Some(self.script.pop_front().unwrap_or(WorkflowEvent::QuitRequested)))
    }

    async fn fetch_key_resource(&mut self, path: &str) -> Result<KeyResource, FetchError> {
        let request = Request::get(path);
        tracing::debug!(location = %self.upstream.locate(&request), "fetching key resource");

        let response = self.upstream.fetch(&request).await.map_err(FetchError::Network)?;
        Ok(KeyResource {
            status: response.status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        })
    }

    async fn read_text_file(&mut self, path: &str) -> Result<String, FileError> {
        Ok(tokio::fs::read_to_string(path).await?)
    }

    async fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError> {
        let Some(path) = &self.copy_to else {
            return Err(ClipboardError::Unsupported);
        };
        tokio::fs::write(path, text).await.map_err(|e| ClipboardError::Write(e.to_string()))
    }

    fn focus_input(&mut self) {
        tracing::debug!("input focus requested");
    }

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn render(&mut self, workflow: &Workflow) -> Result<(), Self::Error> {
        let strings = workflow.strings();

        if workflow.notice() != self.shown.notice.as_ref() {
            if let Some(notice) = workflow.notice() {
                self.print_notice(notice)?;
            }
            self.shown.notice = workflow.notice().cloned();
        }

        if let Some(key) = workflow.key()
            && self.shown.fingerprint.as_deref() != Some(key.fingerprint.as_slice())
        {
            writeln!(self.out, "[{}]", self.headings.key)?;
            writeln!(self.out, "{} {}", strings.get(Msg::LabelUserId), key.user_id)?;
            writeln!(self.out, "{} {}", strings.get(Msg::LabelFingerprint), key.fingerprint_hex())?;
            writeln!(self.out, "{} {}", strings.get(Msg::LabelAlgo), key.algorithm_detail())?;
            self.shown.fingerprint = Some(key.fingerprint.clone());
        }

        match (workflow.ciphertext(), self.shown.ciphertext) {
            (Some(ciphertext), false) => {
                writeln!(self.out, "[{}]", self.headings.result)?;
                writeln!(self.out, "{ciphertext}")?;
                if let Some(mailto) = workflow.mailto() {
                    writeln!(self.out, "{}: {mailto}", strings.get(Msg::BtnEmail))?;
                }
                self.shown.ciphertext = true;
            },
            (None, true) => self.shown.ciphertext = false,
            _ => {},
        }

        if workflow.copy_feedback_active() && !self.shown.copied {
            writeln!(self.out, "{}", strings.get(Msg::BtnCopied))?;
        }
        self.shown.copied = workflow.copy_feedback_active();

        Ok(())
    }

    fn stop(&mut self) {
        if let Err(e) = self.out.flush() {
            tracing::warn!(error = %e, "failed to flush console");
        }
    }
}
