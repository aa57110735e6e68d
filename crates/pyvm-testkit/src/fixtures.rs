//! Fake CPython source archives
//!
//! Real source builds take minutes. The archives built here contain a tiny
//! `configure` shell script that records the requested prefix, and
//! [`write_fake_make`] provides a `make` that "installs" a stub interpreter
//! into that prefix. Together they let the full install path run in tests
//! without a compiler.

use flate2::Compression;
use flate2::write::GzEncoder;
use std::path::{Path, PathBuf};

const CONFIGURE_OK: &str = r#"#!/bin/sh
for arg in "$@"; do
  case "$arg" in
    --prefix=*) echo "${arg#--prefix=}" > .fixture-prefix ;;
  esac
done
echo "checking for fixture... yes"
"#;

const CONFIGURE_FAIL: &str = r#"#!/bin/sh
echo "checking for C compiler... no" >&2
echo "configure: error: no acceptable C compiler found in \$PATH" >&2
exit 1
"#;

const FAKE_MAKE: &str = r#"#!/bin/sh
set -e
case "$1" in
  altinstall)
    prefix=$(cat .fixture-prefix)
    minor=$(cat .fixture-minor)
    mkdir -p "$prefix/bin"
    printf '#!/bin/sh\necho "Python %s"\n' "$(cat .fixture-version)" > "$prefix/bin/python$minor"
    chmod 755 "$prefix/bin/python$minor"
    ;;
  *)
    echo "make $*"
    ;;
esac
"#;

/// `Python-<version>.tgz` bytes whose configure step succeeds
pub fn source_archive_bytes(version: &str) -> Vec<u8> {
    build_archive(version, CONFIGURE_OK)
}

/// `Python-<version>.tgz` bytes whose configure step exits with status 1
pub fn failing_source_archive_bytes(version: &str) -> Vec<u8> {
    build_archive(version, CONFIGURE_FAIL)
}

/// Writes an executable fake `make` into `dir` and returns its path
///
/// Prepend `dir` to `PATH` of the process under test.
pub fn write_fake_make(dir: &Path) -> PathBuf {
    std::fs::create_dir_all(dir).expect("Failed to create fake bin dir");
    let path = dir.join("make");
    std::fs::write(&path, FAKE_MAKE).expect("Failed to write fake make");
    make_executable(&path);
    path
}

/// Writes an executable script printing `Python <version>`, named `name`
///
/// Stands in for a system interpreter on `PATH`.
pub fn write_fake_python(dir: &Path, name: &str, version: &str) -> PathBuf {
    std::fs::create_dir_all(dir).expect("Failed to create fake bin dir");
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\necho \"Python {}\"\n", version))
        .expect("Failed to write fake python");
    make_executable(&path);
    path
}

fn build_archive(version: &str, configure: &str) -> Vec<u8> {
    let minor = version
        .rsplit_once('.')
        .map(|(head, _)| head)
        .unwrap_or(version);
    let top = format!("Python-{}", version);

    let encoder = GzEncoder::new(Vec::new(), Compression::fast());
    let mut builder = tar::Builder::new(encoder);

    append_file(&mut builder, &format!("{}/configure", top), configure, 0o755);
    append_file(
        &mut builder,
        &format!("{}/README.rst", top),
        &format!("This is Python version {}\n", version),
        0o644,
    );
    append_file(&mut builder, &format!("{}/.fixture-version", top), version, 0o644);
    append_file(&mut builder, &format!("{}/.fixture-minor", top), minor, 0o644);

    let encoder = builder.into_inner().expect("Failed to finish tar stream");
    encoder.finish().expect("Failed to finish gzip stream")
}

fn append_file<W: std::io::Write>(
    builder: &mut tar::Builder<W>,
    path: &str,
    content: &str,
    mode: u32,
) {
    let mut header = tar::Header::new_gnu();
    header.set_size(content.len() as u64);
    header.set_mode(mode);
    header.set_cksum();
    builder
        .append_data(&mut header, path, content.as_bytes())
        .expect("Failed to append fixture file");
}

fn make_executable(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)
            .expect("Failed to get metadata")
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms).expect("Failed to set permissions");
    }
    #[cfg(not(unix))]
    let _ = path;
}
