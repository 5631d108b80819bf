mod common;

use std::path::Path;
use std::sync::Arc;

use common::{MockLauncher, RecordingSink};
use pretty_assertions::assert_eq;
use ydl_core::api::{
    DownloadOptions, EventSink, Launch, LaunchError, LaunchOptions, ProcessEvent,
    ProcessSupervisor, YoutubeDl,
};

fn supervisor(launcher: Arc<MockLauncher>) -> ProcessSupervisor {
    ProcessSupervisor::new("youtube-dl", launcher)
}

#[tokio::test]
async fn delivers_each_line_then_joined_transcript() {
    let launcher = MockLauncher::with_stdout("a\nb\nc\n");
    let sink = RecordingSink::new();

    let launch = supervisor(launcher.clone())
        .execute("", None, Some(sink.clone() as Arc<dyn EventSink>))
        .await
        .unwrap();
    assert!(launch.started());
    let outcome = launch.wait().await.unwrap().expect("supervised run");

    assert_eq!(
        sink.events(),
        vec![
            ProcessEvent::DataReceived("a".into()),
            ProcessEvent::DataReceived("b".into()),
            ProcessEvent::DataReceived("c".into()),
            ProcessEvent::Exited("a\nb\nc".into()),
        ]
    );
    assert_eq!(outcome.exit_code, 0);
    assert_eq!(outcome.stdout_lines, 3);
    assert_eq!(outcome.delivered_lines, 3);
}

#[tokio::test]
async fn carriage_return_progress_updates_are_separate_lines() {
    let launcher = MockLauncher::with_stdout(
        "[download]   1.0%\r[download]  50.0%\r[download] 100.0%\r\ndone\n",
    );
    let sink = RecordingSink::stopping_after(2);

    let outcome = supervisor(launcher)
        .execute("", None, Some(sink.clone() as Arc<dyn EventSink>))
        .await
        .unwrap()
        .wait()
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        sink.data_lines(),
        vec!["[download]   1.0%", "[download]  50.0%"]
    );
    assert_eq!(
        sink.events().last(),
        Some(&ProcessEvent::Exited(
            "[download]   1.0%\n[download]  50.0%\n[download] 100.0%\ndone".into()
        ))
    );
    assert_eq!(outcome.stdout_lines, 4);
    assert_eq!(outcome.delivered_lines, 2);
}

#[tokio::test]
async fn latch_suppresses_later_lines_but_keeps_transcript() {
    let launcher = MockLauncher::with_stdout("a\nb\nc\n");
    let sink = RecordingSink::stopping_after(1);

    let launch = supervisor(launcher)
        .execute("", None, Some(sink.clone() as Arc<dyn EventSink>))
        .await
        .unwrap();
    let outcome = launch.wait().await.unwrap().unwrap();

    assert_eq!(sink.data_lines(), vec!["a"]);
    assert_eq!(
        sink.events().last(),
        Some(&ProcessEvent::Exited("a\nb\nc".into()))
    );
    assert_eq!(outcome.delivered_lines, 1);
    assert_eq!(outcome.stdout_lines, 3);
}

#[tokio::test]
async fn stderr_is_forwarded_without_latch() {
    let launcher = MockLauncher::with_output("one\ntwo\n", "ERROR: x\nWARNING: y\n", 1);
    let sink = RecordingSink::stopping_after(1);

    let launch = supervisor(launcher)
        .execute("", None, Some(sink.clone() as Arc<dyn EventSink>))
        .await
        .unwrap();
    let outcome = launch.wait().await.unwrap().unwrap();

    assert_eq!(sink.error_lines(), vec!["ERROR: x", "WARNING: y"]);
    assert_eq!(outcome.exit_code, 1);
    assert_eq!(outcome.stderr_lines, 2);

    let events = sink.events();
    assert_eq!(events.last(), Some(&ProcessEvent::Exited("one\ntwo".into())));
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, ProcessEvent::Exited(_)))
            .count(),
        1
    );
}

#[tokio::test]
async fn empty_stdout_lines_are_skipped() {
    let launcher = MockLauncher::with_stdout("a\n\nb");
    let sink = RecordingSink::new();

    let launch = supervisor(launcher)
        .execute("", None, Some(sink.clone() as Arc<dyn EventSink>))
        .await
        .unwrap();
    launch.wait().await.unwrap();

    assert_eq!(sink.data_lines(), vec!["a", "b"]);
    assert_eq!(sink.events().last(), Some(&ProcessEvent::Exited("a\nb".into())));
}

#[tokio::test]
async fn no_output_still_exits_once_with_empty_transcript() {
    let launcher = MockLauncher::with_stdout("");
    let sink = RecordingSink::new();

    let launch = supervisor(launcher)
        .execute("", None, Some(sink.clone() as Arc<dyn EventSink>))
        .await
        .unwrap();
    launch.wait().await.unwrap();

    assert_eq!(sink.events(), vec![ProcessEvent::Exited(String::new())]);
}

#[tokio::test]
async fn blank_executable_launches_nothing() {
    let launcher = MockLauncher::with_stdout("a\n");
    let sink = RecordingSink::new();

    for exe in ["", "   "] {
        let sup = ProcessSupervisor::new(exe, launcher.clone());
        let launch = sup
            .execute("", None, Some(sink.clone() as Arc<dyn EventSink>))
            .await
            .unwrap();
        assert!(!launch.started());
        assert!(matches!(launch, Launch::Skipped));

        let launch = sup.execute("--version", None, None).await.unwrap();
        assert!(!launch.started());
    }

    assert_eq!(launcher.spawn_count(), 0);
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn without_sink_runs_detached() {
    let launcher = MockLauncher::with_stdout("ignored\n");
    let sup = supervisor(launcher.clone()).with_options(LaunchOptions {
        elevate: true,
        ..LaunchOptions::default()
    });

    let launch = sup
        .execute("-f best 'https://youtu.be/x y'", Some(Path::new("/tmp")), None)
        .await
        .unwrap();
    assert!(launch.started());
    assert!(matches!(launch, Launch::Detached));
    assert!(launch.wait().await.unwrap().is_none());

    let detached = launcher.detached.lock().unwrap().clone();
    assert_eq!(detached.len(), 1);
    assert_eq!(detached[0].args, vec!["-f", "best", "https://youtu.be/x y"]);
    assert_eq!(detached[0].raw_arguments, "-f best 'https://youtu.be/x y'");
    assert_eq!(detached[0].working_directory.as_deref(), Some(Path::new("/tmp")));
    assert!(detached[0].elevate);
    assert!(launcher.supervised.lock().unwrap().is_empty());
}

#[tokio::test]
async fn blank_working_directory_is_dropped() {
    let launcher = MockLauncher::with_stdout("");
    let sink = RecordingSink::new();

    supervisor(launcher.clone())
        .execute("-v", Some(Path::new("")), Some(sink as Arc<dyn EventSink>))
        .await
        .unwrap()
        .wait()
        .await
        .unwrap();

    let spawned = launcher.supervised.lock().unwrap().clone();
    assert_eq!(spawned[0].working_directory, None);
    assert_eq!(spawned[0].args, vec!["-v"]);
}

#[tokio::test]
async fn malformed_argument_string_is_rejected() {
    let launcher = MockLauncher::with_stdout("");
    let err = supervisor(launcher.clone())
        .execute("--output 'unterminated", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, LaunchError::Arguments(_)));
    assert_eq!(launcher.spawn_count(), 0);
}

#[tokio::test]
async fn spawn_failure_surfaces_to_caller() {
    let sink = RecordingSink::new();
    let err = supervisor(MockLauncher::failing())
        .execute("", None, Some(sink.clone() as Arc<dyn EventSink>))
        .await
        .unwrap_err();
    assert!(matches!(err, LaunchError::Spawn(_)));
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn closure_sinks_are_accepted() {
    let launcher = MockLauncher::with_stdout("x\n");
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let seen_in_sink = seen.clone();
    let sink: Arc<dyn EventSink> = Arc::new(move |event: ProcessEvent| {
        seen_in_sink.lock().unwrap().push(event);
        ydl_core::api::SinkControl::Continue
    });

    supervisor(launcher)
        .execute("", None, Some(sink))
        .await
        .unwrap()
        .wait()
        .await
        .unwrap();

    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn downloader_runs_assembled_options() {
    let launcher = MockLauncher::with_stdout("[download] 100%\n");
    let ydl = YoutubeDl::new(supervisor(launcher.clone()));

    let mut opts = DownloadOptions::for_urls(["https://youtu.be/abc"]);
    opts.output = Some("%(title)s.%(ext)s".into());
    opts.working_directory = Some("/media".into());

    let sink = RecordingSink::new();
    ydl.run(&opts, Some(sink.clone() as Arc<dyn EventSink>))
        .await
        .unwrap()
        .wait()
        .await
        .unwrap();

    let spawned = launcher.supervised.lock().unwrap().clone();
    assert_eq!(
        spawned[0].args,
        vec!["--output", "%(title)s.%(ext)s", "https://youtu.be/abc"]
    );
    assert_eq!(spawned[0].working_directory.as_deref(), Some(Path::new("/media")));
    assert_eq!(sink.data_lines(), vec!["[download] 100%"]);
}

#[tokio::test]
async fn probe_version_feeds_the_gate() {
    let ydl = YoutubeDl::new(supervisor(MockLauncher::with_stdout("2018.09.08\n")));
    let reported = ydl.probe_version().await.unwrap();
    assert_eq!(reported.as_deref(), Some("2018.09.08"));
    assert!(ydl.is_compatible_version(reported.as_deref().unwrap()));

    let newer = YoutubeDl::new(supervisor(MockLauncher::with_stdout("2021.12.17\n")));
    let reported = newer.probe_version().await.unwrap().unwrap();
    assert!(!newer.is_compatible_version(&reported));

    let blank = YoutubeDl::new(ProcessSupervisor::new("", MockLauncher::with_stdout("x")));
    assert_eq!(blank.probe_version().await.unwrap(), None);
}

#[tokio::test]
async fn argument_string_is_split_with_posix_rules() {
    let launcher = MockLauncher::with_stdout("");
    let sink = RecordingSink::new();

    supervisor(launcher.clone())
        .execute(
            r"-o 'two words' --batch-file 'C:\dl\urls.txt' --cookies C:\dl\c.txt",
            None,
            Some(sink as Arc<dyn EventSink>),
        )
        .await
        .unwrap()
        .wait()
        .await
        .unwrap();

    let spawned = launcher.supervised.lock().unwrap();
    assert_eq!(
        spawned[0].args,
        vec![
            "-o",
            "two words",
            "--batch-file",
            r"C:\dl\urls.txt",
            "--cookies",
            "C:dlc.txt",
        ]
    );
}
