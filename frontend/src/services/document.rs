//! Preview documents.
//!
//! Every preview surface renders a complete standalone page. Script errors are
//! caught inside the page and logged to its console.

/// Body used by the CSS-only preview.
pub const CSS_PLACEHOLDER: &str = "<div class='rebuild-demo'>CSS preview</div>";

/// Body used by the JS-only preview.
pub const JS_PLACEHOLDER: &str = "<div id='rebuild-js-root'></div>";

/// Minimal HTML document with `css` in a style block, `html` as the body and
/// `js` in a guarded script block.
pub fn build_full_document(html: &str, css: &str, js: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8"/>
    <meta name="viewport" content="width=device-width,initial-scale=1"/>
    <style>{css}</style>
  </head>
  <body>
    {html}
    <script>
      try {{
        {js}
      }} catch(e) {{ console.error(e) }}
    </script>
  </body>
</html>"#
    )
}

/// Generated HTML styled by the CSS. Scripts do not run here.
pub fn html_preview_doc(html: &str, css: &str) -> String {
    build_full_document(html, css, "")
}

pub fn css_preview_doc(css: &str) -> String {
    build_full_document(CSS_PLACEHOLDER, css, "")
}

pub fn js_preview_doc(js: &str) -> String {
    build_full_document(JS_PLACEHOLDER, "", js)
}
