//! Embedded static resources.
//!
//! - `template` - Template type for typed variable injection
//! - `serve` - Dev server resources (reload.js)
//!
//! The reload client is minified at compile time by `build.rs` and baked
//! into the binary; the WebSocket port is injected at serve time.

mod template;

pub use template::{Template, TemplateVars};

pub mod serve {
    use super::{Template, TemplateVars};

    /// Variables for reload.js.
    pub struct ReloadVars {
        pub ws_port: u16,
    }

    impl TemplateVars for ReloadVars {
        fn apply(&self, content: &str) -> String {
            content.replace("__SITEPIPE_WS_PORT__", &self.ws_port.to_string())
        }
    }

    /// Live reload JavaScript with WebSocket port injection.
    pub const RELOAD_JS: Template<ReloadVars> =
        Template::new(include_str!(concat!(env!("OUT_DIR"), "/reload.min.js")));

    /// Inline `<script>` tag carrying the reload client.
    pub fn script_tag(ws_port: u16) -> String {
        format!("<script>{}</script>", RELOAD_JS.render(&ReloadVars { ws_port }))
    }
}
