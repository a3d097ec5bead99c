use serde::Deserialize;

/// Conversion options. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    pub verbose: bool,
    /// Embed each file's program listing on its page.
    pub render_program_listing: bool,
    /// Render `programlisting` blocks found inside descriptions.
    pub render_program_listing_inline: bool,
    /// Put a TODO placeholder on undocumented compounds and members.
    pub suggest_to_do_descriptions: bool,
    /// Prefix of every emitted link and sidebar permalink.
    pub base_url: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            verbose: false,
            render_program_listing: true,
            render_program_listing_inline: true,
            suggest_to_do_descriptions: false,
            base_url: "/api/".to_string(),
        }
    }
}

impl Options {
    /// `base_url` joined with a permalink path, with exactly one `/` between.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let options: Options = serde_json::from_str("{}").unwrap();
        assert_eq!(options, Options::default());
    }

    #[test]
    fn camel_case_keys() {
        let options: Options = serde_json::from_str(
            r#"{"renderProgramListing": false, "suggestToDoDescriptions": true, "baseUrl": "/docs/"}"#,
        )
        .unwrap();
        assert!(!options.render_program_listing);
        assert!(options.render_program_listing_inline);
        assert!(options.suggest_to_do_descriptions);
        assert_eq!(options.url("classes/widget"), "/docs/classes/widget");
    }

    #[test]
    fn url_joins_with_one_slash() {
        let options = Options {
            base_url: "/api".to_string(),
            ..Options::default()
        };
        assert_eq!(options.url("/pages/intro"), "/api/pages/intro");
    }
}
