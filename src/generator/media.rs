//! Wrapper blocks from the page builder: code toolbars, images, videos and
//! the trailing logo.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Context;
use crate::converter::TagSpec;
use crate::error::{Error, Result};

const CODE_TOOLBAR_OPEN: &str = r#"<div class="code-toolbar">"#;
const CODE_TOOLBAR_CLOSE: &str = "</div></div></div>";

const IMAGE_OPEN: &str = r#"<span class="image-inner">"#;
const IMAGE_CLOSE: &str = "</span>";

const VIDEO_OPEN: &str = r#"<div class="js-video video">"#;
const VIDEO_CLOSE: &str = "\n </div>\n </div>\n </p>\n<p>";

const LOGO: &str = r#"  <div class="logo"> "#;

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

/// Highlighted code is not recoverable from the export, so the whole toolbar
/// becomes a placeholder block to fill in by hand.
pub(super) fn code_block(buffer: &str, cx: &Context<'_>) -> Result<String> {
    let settings = cx.settings();
    let replacement = format!(
        "```{}\n{}\n```\n",
        settings.code_block_lang, settings.code_block_placeholder
    );
    cx.transform(
        buffer,
        &TagSpec::delimiters(CODE_TOOLBAR_OPEN, CODE_TOOLBAR_CLOSE),
        |_, _| Ok(replacement.clone()),
    )
}

/// A missing `src=` token or extension fails the stage rather than writing a
/// broken `undefined` link.
pub(super) fn image(buffer: &str, cx: &Context<'_>) -> Result<String> {
    let files_dir = &cx.settings().files_dir;
    cx.transform(buffer, &TagSpec::delimiters(IMAGE_OPEN, IMAGE_CLOSE), |_, inner| {
        let token = inner
            .split_whitespace()
            .find(|token| token.starts_with("src="))
            .ok_or(Error::MissingSource)?;
        let (stem, extension) = file_parts(source_value(token))?;
        Ok(format!("![{stem}]({files_dir}/{stem}.{extension})"))
    })
}

/// Videos become their GIF preview plus a caption linking the hosted file.
pub(super) fn video(buffer: &str, cx: &Context<'_>) -> Result<String> {
    let settings = cx.settings();
    cx.transform(buffer, &TagSpec::delimiters(VIDEO_OPEN, VIDEO_CLOSE), |_, inner| {
        let body = WHITESPACE.replace_all(inner, " ");
        let body = cx.transform(&body, &TagSpec::name("div"), |_, _| Ok(String::new()))?;
        let body = cx.transform(&body, &TagSpec::name("svg"), |_, _| Ok(String::new()))?;
        cx.transform(&body, &TagSpec::name("video"), |attrs, _| {
            let src = attrs.require("video", "src")?;
            let (stem, _) = file_parts(src)?;
            Ok(format!(
                "![{stem}]({}/{stem}.gif)\n\n_{}{src}_\n",
                settings.files_dir, settings.video_host
            ))
        })
    })
}

pub(super) fn logo(buffer: &str, _cx: &Context<'_>) -> Result<String> {
    Ok(buffer.replace(LOGO, "\n"))
}

/// The path inside a `src=` token, without quotes or a trailing `>`.
fn source_value(token: &str) -> &str {
    let value = token.strip_prefix("src=").unwrap_or(token);
    match value.strip_prefix('"') {
        Some(quoted) => quoted.split('"').next().unwrap_or(quoted),
        None => value.trim_end_matches('>'),
    }
}

/// Stem and extension of the last path segment, `a.b.png` giving `(a, b)`.
fn file_parts(path: &str) -> Result<(&str, &str)> {
    let name = path.rsplit('/').next().unwrap_or(path);
    let mut pieces = name.split('.');
    match (pieces.next(), pieces.next()) {
        (Some(stem), Some(extension)) if !stem.is_empty() && !extension.is_empty() => {
            Ok((stem, extension))
        }
        _ => Err(Error::MalformedSource(path.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_code_toolbar_placeholder() {
        let settings = Settings::builtin().unwrap();
        let cx = Context::new(&settings);
        let html = concat!(
            "before\n",
            r#"<div class="code-toolbar"><pre class="language-js"><code>const a = 1</code></pre>"#,
            r#"<div class="toolbar"><div class="toolbar-item"><button>Copy</button></div></div></div>"#,
            "\nafter"
        );
        assert_eq!(
            code_block(html, &cx).unwrap(),
            "before\n```js\n// CODE BLOCKS\n```\n\nafter"
        );
    }

    #[test]
    fn test_image_without_src_fails() {
        let settings = Settings::builtin().unwrap();
        let cx = Context::new(&settings);
        let err = image(r#"<span class="image-inner"><img alt="x"></span>"#, &cx).unwrap_err();
        assert!(matches!(err, Error::MissingSource));
    }

    #[test]
    fn test_image_uses_files_dir() {
        let mut settings = Settings::builtin().unwrap();
        settings.files_dir = "assets".to_owned();
        let cx = Context::new(&settings);
        assert_eq!(
            image(r#"<span class="image-inner"><img src="/lessons/12/cube.jpg"></span>"#, &cx)
                .unwrap(),
            "![cube](assets/cube.jpg)"
        );
    }

    #[test]
    fn test_video_block() {
        let settings = Settings::builtin().unwrap();
        let cx = Context::new(&settings);
        let html = concat!(
            "intro\n",
            r#"<div class="js-video video">"#,
            "\n <div class=\"video-overlay\"></div>",
            "\n <video src=\"/assets/lessons/05/step-1.mp4\" loop muted></video>",
            "\n <svg viewBox=\"0 0 10 10\"><path d=\"M0\"/></svg>",
            "\n </div>\n </div>\n </p>\n<p>",
            "next"
        );
        assert_eq!(
            video(html, &cx).unwrap(),
            "intro\n ![step-1](./files/step-1.gif)\n\n_https://threejs-journey.xyz/assets/lessons/05/step-1.mp4_\n next"
        );
    }

    #[test]
    fn test_video_strips_nested_div_and_svg() {
        let settings = Settings::builtin().unwrap();
        let cx = Context::new(&settings);
        let html = concat!(
            r#"<div class="js-video video"><div class="loader">spinner</div> "#,
            r#"<svg class="play"><circle r="4"/></svg><video src="/v/clip.mp4"></video>"#,
            "\n </div>\n </div>\n </p>\n<p>"
        );
        assert_eq!(
            video(html, &cx).unwrap(),
            " ![clip](./files/clip.gif)\n\n_https://threejs-journey.xyz/v/clip.mp4_\n"
        );
    }

    #[test]
    fn test_video_without_src_fails() {
        let settings = Settings::builtin().unwrap();
        let cx = Context::new(&settings);
        let html = "<div class=\"js-video video\"><video loop></video>\n </div>\n </div>\n </p>\n<p>";
        let err = video(html, &cx).unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { .. }));
    }

    #[test]
    fn test_logo() {
        let settings = Settings::builtin().unwrap();
        let cx = Context::new(&settings);
        assert_eq!(logo("end  <div class=\"logo\"> x", &cx).unwrap(), "end\nx");
    }

    #[test]
    fn test_source_value() {
        assert_eq!(source_value(r#"src="/files/abc.png""#), "/files/abc.png");
        assert_eq!(source_value(r#"src="/files/abc.png">"#), "/files/abc.png");
        assert_eq!(source_value("src=/files/abc.png>"), "/files/abc.png");
    }

    #[test]
    fn test_file_parts() {
        assert_eq!(file_parts("/files/abc.png").unwrap(), ("abc", "png"));
        assert_eq!(file_parts("a.b.png").unwrap(), ("a", "b"));
        assert!(matches!(file_parts("/files/noext"), Err(Error::MalformedSource(_))));
    }
}
