use std::sync::{Arc, Mutex};

use crate::args::{assemble, AssembledCommand, OptionSet, Translator};
use crate::error::LaunchError;
use crate::runner::{EventSink, Launch, ProcessEvent, ProcessSupervisor, SinkControl};
use crate::version::{is_compatible_version, SUPPORTED_VERSION};

/// Option set in, youtube-dl process out.
#[derive(Clone)]
pub struct YoutubeDl {
    supervisor: ProcessSupervisor,
    translator: Arc<Translator>,
}

impl YoutubeDl {
    pub fn new(supervisor: ProcessSupervisor) -> Self {
        Self {
            supervisor,
            translator: Arc::new(Translator::default()),
        }
    }

    pub fn with_translator(mut self, translator: Arc<Translator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn supervisor(&self) -> &ProcessSupervisor {
        &self.supervisor
    }

    pub fn version(&self) -> &'static str {
        SUPPORTED_VERSION
    }

    pub fn is_compatible_version(&self, version: &str) -> bool {
        is_compatible_version(version)
    }

    pub fn build<O: OptionSet + ?Sized>(&self, options: &O) -> AssembledCommand {
        assemble(&self.translator, options)
    }

    pub async fn run<O: OptionSet + Sync + ?Sized>(
        &self,
        options: &O,
        sink: Option<Arc<dyn EventSink>>,
    ) -> Result<Launch, LaunchError> {
        let command = self.build(options);
        self.supervisor
            .execute(
                &command.argument_string(),
                command.working_directory.as_deref(),
                sink,
            )
            .await
    }

    /// Run `<executable> --version` and return the reported version, or
    /// `None` when the executable path is blank.
    pub async fn probe_version(&self) -> Result<Option<String>, LaunchError> {
        let reported: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
        let slot = reported.clone();
        let sink: Arc<dyn EventSink> = Arc::new(move |event: ProcessEvent| {
            if let ProcessEvent::Exited(transcript) = event {
                if let Ok(mut g) = slot.lock() {
                    *g = Some(transcript.trim().to_string());
                }
            }
            SinkControl::Continue
        });

        let launch = self.supervisor.execute("--version", None, Some(sink)).await?;
        if launch.wait().await?.is_none() {
            return Ok(None);
        }

        let version = reported.lock().ok().and_then(|mut g| g.take());
        Ok(version)
    }
}
