use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "mathcomposer_{}_{}_{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn file_sink_replaces_previous_fragment() {
    let dir = temp_dir("replay_sink");
    let path = dir.join("nested").join("replay.py");
    let mut sink = ReplayFileSink::new(&path);

    sink.push("self.clear()\n").unwrap();
    sink.push("self.clear()\nself.wait()\n").unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "self.clear()\nself.wait()\n"
    );
    assert_eq!(sink.pushes(), 2);
    assert!(!sink.staging_path().exists());
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn in_memory_sink_keeps_push_order() {
    let mut sink = InMemoryReplaySink::new();
    assert_eq!(sink.latest(), None);
    sink.push("a").unwrap();
    sink.push("b").unwrap();
    assert_eq!(sink.fragments(), ["a", "b"]);
    assert_eq!(sink.latest(), Some("b"));
}
