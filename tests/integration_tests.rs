//! Integration tests for the option serializer.
//!
//! These tests validate:
//! - The exact wire format for each kind of value
//! - Margins are written before every other flag
//! - Copying from a base configuration drops margins and nothing else
//! - JSON option files drive the same output as hand-built options

use std::fs;

use pdf_flags::flags::FlagSet;
use pdf_flags::margins::Margins;
use pdf_flags::options::{ConvertOptions, Orientation, PageSize};
use pdf_flags::serializer::{to_args, to_tokens};

// =====================================================================
// Helpers
// =====================================================================

fn count(tokens: &[String], flag: &str) -> usize {
    tokens.iter().filter(|t| t.as_str() == flag).count()
}

fn everything() -> ConvertOptions {
    let mut o = ConvertOptions::new();
    o.page_size = Some(PageSize::A3);
    o.page_width = Some(210.0);
    o.page_height = Some(297.5);
    o.page_orientation = Some(Orientation::Landscape);
    o.margins = Margins { top: Some(10), bottom: Some(20), left: None, right: Some(5) };
    o.is_low_quality = true;
    o.is_grayscale = true;
    o.copies = Some(2);
    o.header_html = Some("/tmp/header.html".to_string());
    o.footer_html = Some("/tmp/footer.html".to_string());
    o.footer_left = Some("Left".to_string());
    o.footer_center = Some("[page] of [topage]".to_string());
    o.footer_right = Some("Right".to_string());
    o.footer_font_name = Some("DejaVu Sans".to_string());
    o.footer_font_size = Some(8);
    o.header_spacing = Some(3);
    o.footer_spacing = Some(4);
    o.custom_headers.insert("Authorization".to_string(), "Bearer-xyz".to_string());
    o.cookies.insert("session".to_string(), "42".to_string());
    o.replacements.insert("company".to_string(), "Acme".to_string());
    o
}

// =====================================================================
// End-to-end wire format
// =====================================================================

#[test]
fn end_to_end_example() {
    let mut o = ConvertOptions::new();
    o.page_size = Some(PageSize::A4);
    o.is_grayscale = true;
    o.copies = Some(2);
    o.footer_right = Some("Page 1".to_string());

    assert_eq!(to_args(&o), r#"-s A4 -g --copies 2 --footer-right "Page 1""#);
}

#[test]
fn every_field_in_declaration_order() {
    let expected = concat!(
        "-T 10 -B 20 -R 5 ",
        "-s A3 --page-width \"210\" --page-height \"297.5\" -O Landscape ",
        "-l -g --copies 2 ",
        "--header-html \"/tmp/header.html\" --footer-html \"/tmp/footer.html\" ",
        "--footer-left \"Left\" --footer-center \"[page] of [topage]\" --footer-right \"Right\" ",
        "--footer-font-name \"DejaVu Sans\" --footer-font-size 8 ",
        "--header-spacing 3 --footer-spacing 4 ",
        "--custom-header Authorization Bearer-xyz --cookie session 42 --replace company Acme",
    );
    assert_eq!(to_args(&everything()), expected);
}

#[test]
fn page_size_and_dimensions_are_both_written() {
    let mut o = ConvertOptions::new();
    o.page_size = Some(PageSize::Letter);
    o.page_width = Some(100.0);
    o.page_height = Some(200.0);
    assert_eq!(to_args(&o), r#"-s Letter --page-width "100" --page-height "200""#);
}

#[test]
fn malformed_values_pass_through() {
    let mut o = ConvertOptions::new();
    o.copies = Some(-1);
    o.footer_font_size = Some(0);
    assert_eq!(to_args(&o), "--copies -1 --footer-font-size 0");
}

// =====================================================================
// Per-kind properties
// =====================================================================

#[test]
fn switches_appear_once_without_value() {
    let cases: [(fn(&mut ConvertOptions), &str); 2] = [
        (|o| o.is_low_quality = true, "-l"),
        (|o| o.is_grayscale = true, "-g"),
    ];
    for (set, flag) in cases {
        let mut o = ConvertOptions::new();
        assert_eq!(count(&to_tokens(&o), flag), 0);

        set(&mut o);
        let tokens = to_tokens(&o);
        assert_eq!(tokens, vec![flag.to_string()]);
    }
}

#[test]
fn maps_write_three_tokens_per_entry_in_insertion_order() {
    let mut o = ConvertOptions::new();
    assert!(to_tokens(&o).is_empty());

    for (k, v) in [("z-last", "1"), ("a-first", "2"), ("m-mid", "3")] {
        o.cookies.insert(k.to_string(), v.to_string());
    }
    let tokens = to_tokens(&o);
    assert_eq!(tokens.len(), 9);
    assert_eq!(
        tokens,
        vec!["--cookie", "z-last", "1", "--cookie", "a-first", "2", "--cookie", "m-mid", "3"]
    );
}

#[test]
fn embedded_quotes_are_escaped() {
    let mut o = ConvertOptions::new();
    o.footer_left = Some(r#"He said "hi""#.to_string());

    let args = to_args(&o);
    assert_eq!(args, r#"--footer-left "He said \"hi\"""#);

    let before = r#"He said "hi""#.matches('"').count();
    let after = args.matches('"').count();
    assert!(after > before);
}

#[test]
fn margins_precede_all_other_flags() {
    let mut o = everything();
    o.margins = Margins { left: Some(1), ..Margins::default() };
    let tokens = to_tokens(&o);
    assert_eq!(&tokens[..2], &["-L".to_string(), "1".to_string()]);

    let args = to_args(&o);
    assert!(args.starts_with("-L 1 -s A3"), "unexpected order: {args}");
}

#[test]
fn no_outer_or_doubled_whitespace() {
    let mut o = everything();
    o.margins = Margins::new();
    o.replacements.insert(String::new(), "empty-key".to_string());

    let args = to_args(&o);
    assert_eq!(args, args.trim());
    assert!(!args.contains("  "), "doubled separator in: {args}");
    assert!(args.ends_with("--replace empty-key"));
}

#[test]
fn serializing_twice_is_identical() {
    let o = everything();
    assert_eq!(to_args(&o), to_args(&o));
    assert_eq!(to_tokens(&o), to_tokens(&o));
}

#[test]
fn present_flags_tracks_set_fields() {
    let mut o = ConvertOptions::new();
    o.is_grayscale = false;
    o.footer_spacing = Some(2);
    o.page_orientation = Some(Orientation::Portrait);
    assert_eq!(o.present_flags(), vec!["-O", "--footer-spacing"]);
}

// =====================================================================
// Copying from a base configuration
// =====================================================================

#[test]
fn copy_serializes_like_original_without_margins() {
    let original = everything();
    let copy = ConvertOptions::from_base(&original);

    assert!(copy.margins.is_empty());

    let mut original_without_margins = original.clone();
    original_without_margins.margins = Margins::new();
    assert_eq!(to_args(&copy), to_args(&original_without_margins));
    assert!(!to_args(&copy).contains("-T"));
    assert!(to_args(&original).starts_with("-T 10"));
}

#[test]
fn margins_can_be_set_after_copy() {
    let mut copy = ConvertOptions::from_base(&everything());
    copy.margins.top = Some(30);
    assert!(to_args(&copy).starts_with("-T 30 -s A3"));
}

// =====================================================================
// JSON option files
// =====================================================================

#[test]
fn json_file_matches_hand_built_options() {
    let dir = std::env::temp_dir().join(format!("pdf-flags-it-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("options.json");
    fs::write(
        &path,
        r#"{
            "page_size": "A4",
            "is_grayscale": true,
            "copies": 2,
            "footer_right": "Page 1",
            "custom_headers": { "X-B": "2", "X-A": "1" }
        }"#,
    )
    .unwrap();

    let o = ConvertOptions::from_json_file(&path).unwrap();
    assert_eq!(
        to_args(&o),
        r#"-s A4 -g --copies 2 --footer-right "Page 1" --custom-header X-B 2 --custom-header X-A 1"#
    );

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_json_file_reports_path() {
    let err = ConvertOptions::from_json_file("/nonexistent/pdf-flags/options.json").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/pdf-flags/options.json"));
}

#[test]
fn concurrent_serialization_of_independent_options() {
    let handles: Vec<_> = (1..=4)
        .map(|n| {
            std::thread::spawn(move || {
                let mut o = ConvertOptions::new();
                o.copies = Some(n);
                to_args(&o)
            })
        })
        .collect();

    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        results,
        vec!["--copies 1", "--copies 2", "--copies 3", "--copies 4"]
    );
}
