//! Writing the verified artefact to disk.

use camino::Utf8Path;

/// Permission bit granting the owner execute access.
#[cfg(unix)]
const OWNER_EXECUTE: u32 = 0o100;

/// Write `bytes` to `path` and add the owner execute bit.
///
/// An existing file is overwritten in place, so permission bits it already
/// carries are kept; only owner execute is added. Nothing is rolled back if
/// the write fails part way.
///
/// # Errors
///
/// Returns any I/O error from writing the file or updating its permissions.
pub fn install_artifact(path: &Utf8Path, bytes: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, bytes)?;
    mark_owner_executable(path)
}

#[cfg(unix)]
fn mark_owner_executable(path: &Utf8Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)?.permissions();
    let mode = perms.mode();
    perms.set_mode(mode | OWNER_EXECUTE);
    log::trace!("{path}: mode {mode:o} -> {:o}", perms.mode());
    std::fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn mark_owner_executable(_path: &Utf8Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::rstest;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn scratch() -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let path = Utf8PathBuf::try_from(temp.path().join("waf")).expect("UTF-8 path");
        (temp, path)
    }

    fn mode_of(path: &Utf8Path) -> u32 {
        std::fs::metadata(path)
            .expect("failed to read metadata")
            .permissions()
            .mode()
            & 0o7777
    }

    #[test]
    fn writes_bytes_verbatim() {
        let (_temp, path) = scratch();

        install_artifact(&path, b"#!/usr/bin/env python\n").expect("install");

        let written = std::fs::read(&path).expect("read back");
        assert_eq!(written, b"#!/usr/bin/env python\n");
        assert_eq!(mode_of(&path) & OWNER_EXECUTE, OWNER_EXECUTE);
    }

    #[rstest]
    #[case::owner_only(0o600, 0o700)]
    #[case::group_readable(0o640, 0o740)]
    #[case::world_readable(0o644, 0o744)]
    #[case::already_executable(0o755, 0o755)]
    fn preserves_existing_bits(#[case] before: u32, #[case] after: u32) {
        let (_temp, path) = scratch();
        std::fs::write(&path, b"old").expect("seed file");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(before))
            .expect("set permissions");

        install_artifact(&path, b"new").expect("install");

        assert_eq!(mode_of(&path), after);
        assert_eq!(std::fs::read(&path).expect("read back"), b"new");
    }
}
