use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Bytes stored as `universal.apk` in the fake bundletool output.
pub const APK_BYTES: &[u8] = b"PK-fake-universal-apk-payload";

/// Isolated workspace with its own HOME and a fake `java` launcher.
pub struct TestEnv {
    tmp: TempDir,
    pub home: PathBuf,
    pub work: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let work = tmp.path().join("work");
        fs::create_dir_all(&home).expect("create isolated home");
        fs::create_dir_all(&work).expect("create work dir");
        Self { tmp, home, work }
    }

    /// Command running the binary inside `work`, never touching the real cache.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("aab2apk");
        cmd.current_dir(&self.work)
            .env("HOME", &self.home)
            .env_remove("JAVA")
            .env_remove("JAVA_HOME")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Create a bundle at `rel` below `work`.
    pub fn bundle(&self, rel: &str) -> PathBuf {
        let path = self.work.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"fake bundle").unwrap();
        path
    }

    /// A `java` stand-in that copies a prepared `.apks` archive to `--output=`.
    ///
    /// Each invocation appends its arguments to `calls.log`.
    #[cfg(unix)]
    pub fn succeeding_java(&self) -> PathBuf {
        let archive = self.tmp.path().join("fixture.apks");
        write_apks(&archive, APK_BYTES);
        self.copying_java("java-ok", &archive)
    }

    /// A `java` stand-in whose `.apks` has a `universal.apk` failing its CRC check.
    #[cfg(unix)]
    pub fn corrupt_java(&self) -> PathBuf {
        let archive = self.tmp.path().join("corrupt.apks");
        write_apks(&archive, APK_BYTES);
        let mut bytes = fs::read(&archive).unwrap();
        let at = bytes
            .windows(APK_BYTES.len())
            .position(|w| w == APK_BYTES)
            .expect("stored payload in fixture");
        bytes[at] ^= 0xff;
        fs::write(&archive, bytes).unwrap();
        self.copying_java("java-corrupt", &archive)
    }

    #[cfg(unix)]
    fn copying_java(&self, name: &str, archive: &Path) -> PathBuf {
        let log = self.calls_log();
        self.script(
            name,
            &format!(
                "#!/bin/sh\n\
                 echo \"$@\" >> '{}'\n\
                 for arg in \"$@\"; do\n\
                 case \"$arg\" in\n\
                 --output=*) cp '{}' \"${{arg#--output=}}\" ;;\n\
                 esac\n\
                 done\n",
                log.display(),
                archive.display()
            ),
        )
    }

    /// A `java` stand-in that logs its call and exits with `code`.
    #[cfg(unix)]
    pub fn failing_java(&self, code: i32) -> PathBuf {
        let log = self.calls_log();
        self.script(
            "java-fail",
            &format!(
                "#!/bin/sh\necho \"$@\" >> '{}'\nexit {}\n",
                log.display(),
                code
            ),
        )
    }

    /// Empty directory to hand the binary as `TMPDIR`.
    pub fn scratch_root(&self) -> PathBuf {
        let root = self.tmp.path().join("scratch");
        fs::create_dir_all(&root).expect("create scratch root");
        root
    }

    /// Entries left in `dir`.
    pub fn leftovers(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }

    pub fn calls_log(&self) -> PathBuf {
        self.tmp.path().join("calls.log")
    }

    /// Lines written to `calls.log`, one per launcher invocation.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.calls_log())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[cfg(unix)]
    fn script(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = self.tmp.path().join(name);
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }
}

/// Write a bundletool-style `.apks` archive holding `universal.apk`.
///
/// The APK entry is stored uncompressed, the way bundletool stores it.
pub fn write_apks(path: &Path, apk: &[u8]) {
    let file = fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    zip.start_file("toc.pb", zip::write::SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"toc").unwrap();
    let stored =
        zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    zip.start_file("universal.apk", stored).unwrap();
    zip.write_all(apk).unwrap();
    zip.finish().unwrap();
}
