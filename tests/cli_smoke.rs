use std::path::PathBuf;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_ragscene")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "ragscene.exe"
            } else {
                "ragscene"
            });
            p
        })
}

#[test]
fn cli_frame_writes_png() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let out_path = dir.join("c1.png");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(exe())
        .args(["frame", "--surface", "c1", "--time", "1.5", "--width", "430"])
        .arg("--out")
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    let img = image::open(&out_path).unwrap();
    assert_eq!((img.width(), img.height()), (860, 400));
}

#[test]
fn cli_frame_rejects_unknown_surface() {
    let out_path = PathBuf::from("target").join("cli_smoke").join("nope.png");
    let status = std::process::Command::new(exe())
        .args(["frame", "--surface", "c99", "--time", "0", "--out"])
        .arg(&out_path)
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn cli_run_drives_the_loop() {
    let status = std::process::Command::new(exe())
        .args(["run", "--ticks", "40", "--resize-at", "10", "--width", "500"])
        .status()
        .unwrap();
    assert!(status.success());
}

#[test]
fn cli_sequence_rejects_unbounded_range() {
    let dir = PathBuf::from("target").join("cli_smoke").join("seq_inf");
    let _ = std::fs::remove_dir_all(&dir);
    let status = std::process::Command::new(exe())
        .args(["sequence", "--surface", "c1", "--to", "inf", "--out-dir"])
        .arg(&dir)
        .status()
        .unwrap();
    assert!(!status.success());
    assert!(!dir.exists());
}
