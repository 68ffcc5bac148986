//! Fake upstream: releases API and release assets served by mockito

use mockito::{Matcher, ServerGuard};
use sha2::{Digest, Sha512};
use tempfile::TempDir;

pub const SOURCE: &[u8] = include_bytes!("../fixtures/icu4c-72_1-src.tgz");
pub const SIGNATURE: &[u8] = include_bytes!("../fixtures/icu4c-72_1-src.tgz.asc");
pub const SIGNING_KEY: &str = include_str!("../fixtures/signing-key.asc");
pub const UNRELATED_KEY: &str = include_str!("../fixtures/unrelated-key.asc");

const RELEASES_PATH: &str = "/repos/unicode-org/icu/releases";

/// Serves a single page of releases followed by an empty page.
///
/// "ICU 72.1" carries assets hosted on `server`; "ICU 71.1" has none.
pub async fn serve_upstream(server: &mut ServerGuard) {
    let url = server.url();
    let page = format!(
        r#"[
            {{
                "tag_name": "release-72-1",
                "name": "ICU 72.1",
                "draft": false,
                "prerelease": false,
                "assets": [
                    {{"name": "icu4c-72_1-src.tgz", "browser_download_url": "{url}/assets/icu4c-72_1-src.tgz"}},
                    {{"name": "icu4c-72_1-src.tgz.asc", "browser_download_url": "{url}/assets/icu4c-72_1-src.tgz.asc"}},
                    {{"name": "SHASUM512.txt", "browser_download_url": "{url}/assets/SHASUM512.txt"}}
                ]
            }},
            {{
                "tag_name": "release-73-rc",
                "name": "ICU 73 RC",
                "draft": false,
                "prerelease": true,
                "assets": []
            }},
            {{
                "tag_name": "release-71-1",
                "name": "ICU 71.1",
                "draft": false,
                "prerelease": false,
                "assets": []
            }}
        ]"#
    );

    server
        .mock("GET", RELEASES_PATH)
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page)
        .create_async()
        .await;
    server
        .mock("GET", RELEASES_PATH)
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    server
        .mock("GET", "/assets/icu4c-72_1-src.tgz")
        .with_status(200)
        .with_body(SOURCE)
        .create_async()
        .await;
    server
        .mock("GET", "/assets/icu4c-72_1-src.tgz.asc")
        .with_status(200)
        .with_body(SIGNATURE)
        .create_async()
        .await;
    server
        .mock("GET", "/assets/SHASUM512.txt")
        .with_status(200)
        .with_body(format!(
            "{:x} *icu4c-72_1-src.zip\n{:x} *icu4c-72_1-src.tgz\n",
            Sha512::digest(b"zip"),
            Sha512::digest(SOURCE)
        ))
        .create_async()
        .await;
}

/// Writes a buildpack.toml that already lists ICU 71.1.0
pub fn buildpack_toml_with_71_1() -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("buildpack.toml");
    std::fs::write(
        &path,
        r#"api = "0.7"

[buildpack]
  id = "paketo-buildpacks/icu"

[metadata]

  [[metadata.dependencies]]
    id = "icu"
    stacks = ["io.buildpacks.stacks.jammy"]
    version = "71.1.0"
"#,
    )
    .unwrap();
    (temp_dir, path)
}
