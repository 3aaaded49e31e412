use assetsync_core::{Message, Severity};
use assetsync_renderer::{MessageContext, MessageFormat, Renderer, TemplateEngine};
use tempfile::TempDir;

fn failure() -> Message {
    Message {
        title: "Asset publish was not completed, please check and copy manually.".to_string(),
        detail: vec!["Publish: module-shop".to_string(), "disk full".to_string()],
        severity: Severity::Error,
    }
}

fn success() -> Message {
    Message {
        title: "All assets published successfully.".to_string(),
        detail: vec![],
        severity: Severity::Success,
    }
}

// ---------------------------------------------------------------------------
// Embedded templates
// ---------------------------------------------------------------------------

#[test]
fn both_formats_render_every_detail_entry() {
    let renderer = Renderer::new().expect("renderer");
    for format in [MessageFormat::Text, MessageFormat::Html] {
        let out = renderer.render(&failure(), format).expect("render");
        assert!(out.contains("disk full"), "{format:?} missing detail: {out}");
        assert!(out.contains("module-shop"), "{format:?} missing header: {out}");
        assert!(!out.contains('\r'), "{format:?} output contains CR");
    }
}

#[test]
fn success_text_is_a_single_line() {
    let renderer = Renderer::new().expect("renderer");
    let text = renderer.render(&success(), MessageFormat::Text).expect("render");
    assert_eq!(text, "[success] All assets published successfully.");
}

#[test]
fn info_panel_keeps_info_class() {
    let renderer = Renderer::new().expect("renderer");
    let msg = Message {
        title: "Some compiled asset files could not be deleted.".to_string(),
        detail: vec!["app.min.css".to_string()],
        severity: Severity::Info,
    };
    let html = renderer.render(&msg, MessageFormat::Html).expect("render");
    assert!(html.contains("card card-info"), "got: {html}");
}

// ---------------------------------------------------------------------------
// User overrides
// ---------------------------------------------------------------------------

#[test]
fn user_template_overrides_embedded_text() {
    let dir = TempDir::new().expect("tempdir");
    let message_dir = dir.path().join("message");
    std::fs::create_dir_all(&message_dir).expect("mkdir");
    std::fs::write(
        message_dir.join("plain.txt.tera"),
        "{{ severity | upper }}: {{ title }} ({{ detail | length }})\r\n",
    )
    .expect("write");

    let renderer = Renderer::with_template_dir(Some(dir.path())).expect("renderer");
    let text = renderer.render(&failure(), MessageFormat::Text).expect("render");
    assert_eq!(
        text,
        "ERROR: Asset publish was not completed, please check and copy manually. (2)"
    );

    // The html template was not overridden.
    let html = renderer.render(&failure(), MessageFormat::Html).expect("render");
    assert!(html.contains("card card-danger"));
}

#[test]
fn non_tera_files_in_template_dir_are_ignored() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("README.md"), "{{ broken").expect("write");
    TemplateEngine::new(Some(dir.path())).expect("engine ignores non-.tera files");
}

#[test]
fn missing_template_dir_falls_back_to_embedded() {
    let dir = TempDir::new().expect("tempdir");
    let engine = TemplateEngine::new(Some(&dir.path().join("absent"))).expect("engine");
    let ctx = MessageContext::from_message(&success());
    let out = engine.render(&ctx, MessageFormat::Html).expect("render");
    assert_eq!(out, "All assets published successfully.");
}

#[test]
fn broken_user_template_is_a_tera_error() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("broken.tera"), "{% if %}").expect("write");
    let err = TemplateEngine::new(Some(dir.path())).err().expect("must fail");
    assert!(err.to_string().contains("message template error"), "got: {err}");
}
