use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile;

type STDRESULT = Result<(), Box<dyn std::error::Error>>;

#[test]
fn compress_then_decompress_roundtrip() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let src = dir.path().join("sample.txt");
    fs::write(&src, b"the quick brown fox jumps over the lazy dog".repeat(50))?;

    Command::cargo_bin("lzwrs")?
        .arg("compress")
        .arg(&src)
        .assert()
        .success();

    let compressed = dir.path().join("sample.txt.Z");
    assert!(compressed.exists(), "compressed file should be created");
    assert!(!src.exists(), "source should be removed by default");

    Command::cargo_bin("lzwrs")?
        .arg("decompress")
        .arg(&compressed)
        .assert()
        .success();

    assert!(src.exists(), "decompression should restore the original name");
    assert!(!compressed.exists(), "compressed file should be removed by default");
    Ok(())
}

#[test]
fn keep_flag_preserves_source() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let src = dir.path().join("sample.txt");
    fs::write(&src, b"keep me around")?;

    Command::cargo_bin("lzwrs")?
        .arg("compress")
        .arg("--keep")
        .arg("--force")
        .arg(&src)
        .assert()
        .success();

    assert!(src.exists());
    assert!(dir.path().join("sample.txt.Z").exists());
    Ok(())
}

#[test]
fn decompress_skips_files_without_z_extension_by_default() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let plain = dir.path().join("plain.bin");
    fs::write(&plain, b"not actually compressed")?;

    Command::cargo_bin("lzwrs")?
        .arg("decompress")
        .arg("--verbose")
        .arg(&plain)
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped"));

    // Content must be untouched since it was skipped.
    assert_eq!(fs::read(&plain)?, b"not actually compressed");
    Ok(())
}

#[test]
fn decompress_force_handles_file_without_z_extension_in_place() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let src = dir.path().join("sample.txt");
    fs::write(&src, b"round and round it goes".repeat(20))?;

    Command::cargo_bin("lzwrs")?
        .arg("compress")
        .arg("--keep")
        .arg("--force")
        .arg(&src)
        .assert()
        .success();

    let compressed = dir.path().join("sample.txt.Z");
    let renamed = dir.path().join("sample.blob");
    fs::rename(&compressed, &renamed)?;

    Command::cargo_bin("lzwrs")?
        .arg("decompress")
        .arg("--force")
        .arg(&renamed)
        .assert()
        .success();

    assert_eq!(
        fs::read(&renamed)?,
        b"round and round it goes".repeat(20)
    );
    Ok(())
}

#[test]
fn recursive_flag_walks_directories() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let sub = dir.path().join("sub");
    fs::create_dir(&sub)?;
    let nested = sub.join("nested.txt");
    fs::write(&nested, b"nested file contents, repeated ".repeat(20))?;

    Command::cargo_bin("lzwrs")?
        .arg("compress")
        .arg("--recursive")
        .arg("--force")
        .arg(dir.path())
        .assert()
        .success();

    assert!(sub.join("nested.txt.Z").exists());
    Ok(())
}

#[test]
fn non_recursive_skips_directories() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let sub = dir.path().join("sub");
    fs::create_dir(&sub)?;
    let nested = sub.join("nested.txt");
    fs::write(&nested, b"should not be touched")?;

    Command::cargo_bin("lzwrs")?
        .arg("compress")
        .arg(dir.path())
        .assert()
        .success();

    assert!(!sub.join("nested.txt.Z").exists());
    assert!(Path::new(&nested).exists());
    Ok(())
}
