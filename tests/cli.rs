use image::{Rgba, RgbaImage};
use std::fs;
use std::process::Command;
use stegwalk_lib::{media, BitstreamCodec, Channel, ChannelPacker};

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_stegwalk-cli"))
}

#[test]
fn it_encodes_decodes_and_compares_from_a_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let cover = dir.path().join("cover.png");
    let stego = dir.path().join("stego.png");
    let diff = dir.path().join("diff.png");
    let config = dir.path().join("config.json");

    let img = RgbaImage::from_fn(64, 64, |x, y| Rgba([x as u8, y as u8, 128, 255]));
    media::save_image(&img, &cover).unwrap();

    let json = serde_json::json!({
        "encode": { "input": cover, "output": stego, "text": "from the config" },
        "decode": { "input": stego },
        "compare": { "first": cover, "second": stego, "output": diff },
        "eot": "#", "entry": 1, "key": 2, "op": "green"
    });
    fs::write(&config, json.to_string()).unwrap();

    let status = cli().arg("-c").arg(&config).arg("encode").status().unwrap();
    assert!(status.success());

    let output = cli().arg("-c").arg(&config).arg("decode").output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap().trim(),
        "Decoded text: \"from the config\""
    );

    let status = cli().arg("-c").arg(&config).arg("compare").status().unwrap();
    assert!(status.success());

    let changed = img
        .pixels()
        .zip(media::load_image(&stego).unwrap().pixels())
        .filter(|(a, b)| a != b)
        .count();
    let green = media::load_image(&diff)
        .unwrap()
        .pixels()
        .filter(|p| **p == Rgba([0, 255, 0, 255]))
        .count();
    assert!(changed > 0);
    assert_eq!(green, changed);
}

#[test]
fn it_prints_non_utf8_payloads_as_base64() {
    let dir = tempfile::tempdir().unwrap();
    let stego = dir.path().join("stego.png");
    let config = dir.path().join("config.json");
    fs::write(&config, "{}").unwrap();

    let cover = RgbaImage::from_fn(32, 32, |x, y| Rgba([x as u8, y as u8, 77, 255]));
    let packer = ChannelPacker::new(cover, Channel::Red);
    let img = BitstreamCodec::new(packer, 1, 1, "#")
        .encode([0xffu8, 0xfe])
        .unwrap();
    media::save_image(&img, &stego).unwrap();

    let output = cli()
        .arg("-c")
        .arg(&config)
        .args(["--channel", "red", "--entry", "1", "--key", "1"])
        .args(["--eot", "#", "decode", "--input"])
        .arg(&stego)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap().trim(),
        "Decoded text: \"base64://4=\""
    );
}

#[test]
fn it_reads_text_from_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let cover = dir.path().join("cover.png");
    let stego = dir.path().join("stego.png");
    let text_file = dir.path().join("message.txt");
    let config = dir.path().join("config.json");

    media::save_image(&RgbaImage::from_pixel(64, 64, Rgba([40, 41, 42, 255])), &cover).unwrap();
    fs::write(&text_file, "line one\nline two").unwrap();
    fs::write(&config, r#"{ "eot": "<EOT>", "entry": 2, "key": 2, "channel": "blue" }"#).unwrap();

    let mut text_arg = std::ffi::OsString::from("@");
    text_arg.push(&text_file);
    let status = cli()
        .arg("-c")
        .arg(&config)
        .arg("encode")
        .arg("--input")
        .arg(&cover)
        .arg("--output")
        .arg(&stego)
        .arg("--text")
        .arg(text_arg)
        .status()
        .unwrap();
    assert!(status.success());

    let packer = ChannelPacker::new(media::load_image(&stego).unwrap(), Channel::Blue);
    let decoded = BitstreamCodec::new(packer, 2, 2, "<EOT>").decode().unwrap();
    assert_eq!(decoded, b"line one\nline two");
}

#[test]
fn it_prefers_command_line_values() {
    let dir = tempfile::tempdir().unwrap();
    let cover = dir.path().join("cover.png");
    let stego = dir.path().join("stego.bmp");
    let config = dir.path().join("config.json");

    media::save_image(&RgbaImage::from_pixel(64, 64, Rgba([9, 9, 9, 255])), &cover).unwrap();
    fs::write(&config, r##"{ "eot": "#", "entry": 1, "key": 1, "channel": "red" }"##).unwrap();

    let status = cli()
        .arg("-c")
        .arg(&config)
        .args(["--channel", "blue", "--key", "3"])
        .arg("encode")
        .arg("--input")
        .arg(&cover)
        .arg("--output")
        .arg(&stego)
        .args(["--text", "flags win"])
        .status()
        .unwrap();
    assert!(status.success());

    let reloaded = media::load_image(&stego).unwrap();
    let packer = ChannelPacker::new(reloaded, Channel::Blue);
    let decoded = BitstreamCodec::new(packer, 1, 3, "#")
        .decode()
        .unwrap();
    assert_eq!(decoded, b"flags win");
}

#[test]
fn it_fails_without_an_input_image() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, "{}").unwrap();

    let output = cli().arg("-c").arg(&config).arg("decode").output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("decode.input"));
}
