use crate::types::TrackMetadata;

/// Substituted for template placeholders whose metadata value is absent.
pub(crate) const NOT_AVAILABLE: &str = "N/A";

const ILLEGAL_CHARACTERS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Removes characters that are illegal in file names and trims surrounding
/// whitespace. Idempotent.
pub(crate) fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| !ILLEGAL_CHARACTERS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Substitutes `{title}`, `{artist}` and `{album}` placeholders with values
/// from the metadata record. `{artist}` falls back to the uploader. Unknown
/// placeholders are left verbatim.
pub(crate) fn render_template(template: &str, metadata: &TrackMetadata) -> String {
    let artist = metadata
        .artist
        .as_deref()
        .or(metadata.uploader.as_deref())
        .unwrap_or(NOT_AVAILABLE);
    let album = metadata.album.as_deref().unwrap_or(NOT_AVAILABLE);

    template
        .replace("{title}", &metadata.title)
        .replace("{artist}", artist)
        .replace("{album}", album)
}

/// Derives the output file base name (without extension). An absent or
/// whitespace-only template falls back to the sanitized title; an empty
/// sanitized title falls back to the sanitized track identifier.
pub(crate) fn output_basename(custom_format: Option<&str>, metadata: &TrackMetadata) -> String {
    let candidate = match custom_format {
        Some(template) if !template.trim().is_empty() => render_template(template, metadata),
        _ => metadata.title.clone(),
    };

    let sanitized = sanitize(&candidate);
    if !sanitized.is_empty() {
        return sanitized;
    }

    let from_title = sanitize(&metadata.title);
    if !from_title.is_empty() {
        return from_title;
    }

    sanitize(&metadata.id)
}

#[cfg(test)]
mod tests {
    use super::{output_basename, render_template, sanitize};
    use crate::types::TrackMetadata;

    fn metadata() -> TrackMetadata {
        TrackMetadata {
            id: "123456".into(),
            title: "My Song".into(),
            uploader: Some("DJ X".into()),
            artist: None,
            album: None,
            ..TrackMetadata::default()
        }
    }

    #[test]
    fn should_remove_illegal_characters_and_trim() {
        assert_eq!(sanitize(r#" My/Song: "Live"? <x>|*\ "#), "MySong Live x");
    }

    #[test]
    fn should_be_idempotent() {
        let once = sanitize(r#"a/b:c"d"#);

        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn should_substitute_known_placeholders() {
        let meta = TrackMetadata {
            artist: Some("Artist".into()),
            album: Some("Album".into()),
            ..metadata()
        };

        assert_eq!(
            render_template("{artist} - {title} ({album})", &meta),
            "Artist - My Song (Album)"
        );
    }

    #[test]
    fn should_fall_back_to_uploader_when_artist_is_absent() {
        assert_eq!(
            render_template("{artist} - {title}", &metadata()),
            "DJ X - My Song"
        );
    }

    #[test]
    fn should_substitute_not_available_for_missing_values() {
        let meta = TrackMetadata {
            uploader: None,
            ..metadata()
        };

        assert_eq!(render_template("{artist} ({album})", &meta), "N/A (N/A)");
    }

    #[test]
    fn should_leave_unknown_placeholders_verbatim() {
        assert_eq!(
            render_template("{title} {bitrate}", &metadata()),
            "My Song {bitrate}"
        );
    }

    #[test]
    fn should_use_template_when_present() {
        assert_eq!(
            output_basename(Some("{artist} - {title}"), &metadata()),
            "DJ X - My Song"
        );
    }

    #[test]
    fn should_fall_back_to_title_for_whitespace_only_template() {
        assert_eq!(output_basename(Some("   "), &metadata()), "My Song");
        assert_eq!(output_basename(None, &metadata()), "My Song");
    }

    #[test]
    fn should_fall_back_to_identifier_when_title_sanitizes_to_nothing() {
        let meta = TrackMetadata {
            title: r#"\/*?:"<>|"#.into(),
            ..metadata()
        };

        assert_eq!(output_basename(None, &meta), "123456");
    }

    #[test]
    fn should_sanitize_rendered_template() {
        let meta = TrackMetadata {
            title: "My/Song".into(),
            ..metadata()
        };

        assert_eq!(output_basename(Some("{title}?"), &meta), "MySong");
    }
}
