//! Reference extraction
//!
//! Finds the asset file names a Markdown document refers to. Matching is
//! regex based, not a Markdown parse: references inside code blocks or HTML
//! comments are counted, and references split across lines are missed.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use super::normalize::{
    literal_basename, percent_decoded, reference_basename, strip_angle_brackets, strip_title,
};

/// Set of referenced file names (basenames)
pub type ReferenceSet = BTreeSet<String>;

/// Markdown image: ![alt](path "title")
pub static MD_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*\]\(([^)]+)\)").expect("Invalid MD_IMAGE_RE regex"));

/// HTML image tag: <img ... src="path" ...>
pub static HTML_IMG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*?\ssrc\s*=\s*["']([^"']+)["']"#).expect("Invalid HTML_IMG_RE regex")
});

/// Reference-style definition: [id]: path
pub static REF_DEF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*\[[^\]]+\]:[ \t]*(?:<([^>\n]+)>|(\S+))").expect("Invalid REF_DEF_RE regex")
});

/// Any `<name>.assets/<file>)` occurrence, whatever syntax surrounds it
pub static ASSET_PATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\w\-./\\]+\.assets[/\\]([\w.\- %()+,]+)\)").expect("Invalid ASSET_PATH_RE regex")
});

/// Extract every referenced file name from document text
pub fn extract_references(markdown: &str) -> ReferenceSet {
    let mut refs = ReferenceSet::new();

    let markdown_images = markdown_image_targets(markdown);
    let html_images = html_image_targets(markdown);
    let definitions = reference_definition_targets(markdown);
    let asset_paths = asset_path_targets(markdown);

    tracing::debug!(
        markdown_images = markdown_images.len(),
        html_images = html_images.len(),
        definitions = definitions.len(),
        asset_paths = asset_paths.len(),
        "extracted reference targets"
    );

    for target in markdown_images
        .iter()
        .chain(&html_images)
        .chain(&definitions)
        .chain(&asset_paths)
    {
        insert_reference(&mut refs, target);
    }

    refs
}

/// Destinations of `![alt](path)` images, title removed
pub fn markdown_image_targets(markdown: &str) -> Vec<String> {
    MD_IMAGE_RE
        .captures_iter(markdown)
        .filter_map(|caps| caps.get(1))
        .map(|m| strip_title(strip_angle_brackets(m.as_str())).to_string())
        .collect()
}

/// `src` values of `<img>` tags
pub fn html_image_targets(markdown: &str) -> Vec<String> {
    HTML_IMG_RE
        .captures_iter(markdown)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// Destinations of `[id]: path` definitions
pub fn reference_definition_targets(markdown: &str) -> Vec<String> {
    REF_DEF_RE
        .captures_iter(markdown)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// File names following a `.assets/` path segment
pub fn asset_path_targets(markdown: &str) -> Vec<String> {
    ASSET_PATH_RE
        .captures_iter(markdown)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Record a target under every name it may match on disk: with and without
/// a `?query`/`#fragment` suffix, each raw and percent-decoded
fn insert_reference(refs: &mut ReferenceSet, target: &str) {
    for name in [reference_basename(target), literal_basename(target)] {
        if name.is_empty() {
            continue;
        }
        if let Some(decoded) = percent_decoded(name) {
            refs.insert(decoded);
        }
        refs.insert(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> ReferenceSet {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_markdown_image() {
        let refs = extract_references("Intro ![diagram](test.assets/a.png) text");
        assert_eq!(refs, set(&["a.png"]));
    }

    #[test]
    fn test_markdown_image_with_title() {
        let refs = extract_references(r#"![x](img/a.png "Figure 1") ![y](b.png 'B')"#);
        assert_eq!(refs, set(&["a.png", "b.png"]));
    }

    #[test]
    fn test_markdown_image_angle_brackets() {
        let refs = extract_references("![x](<test.assets/my image.png>)");
        assert!(refs.contains("my image.png"));
    }

    #[test]
    fn test_html_img_double_and_single_quotes() {
        let md = r#"<img src="test.assets/b.jpg" width="300"> <IMG alt='x' SRC='c.gif'/>"#;
        assert_eq!(extract_references(md), set(&["b.jpg", "c.gif"]));
    }

    #[test]
    fn test_html_img_ignores_data_src_prefix() {
        let targets = html_image_targets(r#"<img data-src="lazy.png" src="real.png">"#);
        assert_eq!(targets, vec!["real.png".to_string()]);
    }

    #[test]
    fn test_reference_definition() {
        let md = "![logo][l]\n\n[l]: ./images/logo.svg\n  [other]: <spaced name.png> \"T\"\n";
        let refs = extract_references(md);
        assert!(refs.contains("logo.svg"));
        assert!(refs.contains("spaced name.png"));
    }

    #[test]
    fn test_reference_definition_must_start_line() {
        assert!(reference_definition_targets("see [x]: y.png inline").is_empty());
    }

    #[test]
    fn test_asset_path_rule_catches_plain_links() {
        let refs = extract_references("[download](notes.assets/report (final).pdf)");
        assert!(refs.contains("report (final).pdf"));
    }

    #[test]
    fn test_query_fragment_and_directories_stripped() {
        let refs = extract_references("![a](./sub/img.png?v=2) <img src=\"../x/y.png#top\">");
        assert!(refs.contains("img.png"));
        assert!(refs.contains("y.png"));
    }

    #[test]
    fn test_hash_in_file_name_is_kept() {
        let refs = extract_references("![x](test.assets/C#-notes.png)");
        assert!(refs.contains("C#-notes.png"));

        let refs = extract_references("<img src=\"img/what?.png\">");
        assert!(refs.contains("what?.png"));
    }

    #[test]
    fn test_percent_encoded_adds_decoded_name() {
        let refs = extract_references("![a](test.assets/my%20shot.png)");
        assert!(refs.contains("my shot.png"));
        assert!(refs.contains("my%20shot.png"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let refs = extract_references("![a](a.png) ![b](a.png) <img src=\"a.png\">\n[r]: a.png");
        assert_eq!(refs, set(&["a.png"]));
    }

    #[test]
    fn test_no_references() {
        assert!(extract_references("# Title\n\nJust text, a [link](https://example.com/).").is_empty());
        assert!(extract_references("").is_empty());
    }

    #[test]
    fn test_markdown_and_html_together() {
        let md = "![alt](test.assets/a.png)\n\n<img src=\"test.assets/b.jpg\">\n";
        assert_eq!(extract_references(md), set(&["a.png", "b.jpg"]));
    }
}
