use super::*;
use crate::assets::text::FixedAdvance;

const CAKE: &str = "Treat yourself to a divine Blueberry Cake - INR 900.00!";

fn params(max_width: f64) -> WrapParams {
    WrapParams {
        origin: Point::new(20.0, 310.0),
        max_width,
        line_advance: 20.0,
        size_px: 16.0,
    }
}

/// 8 px per char at 16 px.
fn measurer() -> FixedAdvance {
    FixedAdvance::new(0.5)
}

#[test]
fn cake_copy_wraps_into_expected_lines() {
    let mut m = measurer();
    let lines = wrap_text(CAKE, params(200.0), &mut m);
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(
        texts,
        ["Treat yourself to a", "divine Blueberry Cake -", "INR 900.00!"]
    );
    assert_eq!(lines[0].origin, Point::new(20.0, 310.0));
    assert_eq!(lines[1].origin, Point::new(20.0, 330.0));
    assert_eq!(lines[2].origin, Point::new(20.0, 350.0));
    assert_eq!(lines[0].width, 160.0);
    assert_eq!(lines[1].width, 192.0);
    assert_eq!(lines[2].width, 96.0);
}

#[test]
fn wrapped_lines_respect_width_and_preserve_words() {
    let mut m = measurer();
    let full_width = f64::from(m.measure(CAKE, 16.0));
    for max_width in [60.0, 100.0, 150.0, 200.0, 333.0] {
        assert!(max_width < full_width);
        let lines = wrap_text(CAKE, params(max_width), &mut m);
        assert!(lines.len() >= 2, "max_width {max_width}");

        for line in &lines {
            let single_word = !line.text.contains(' ');
            assert!(
                line.width <= max_width || single_word,
                "line {:?} is {} wide, limit {}",
                line.text,
                line.width,
                max_width
            );
        }

        let rebuilt: Vec<&str> = lines
            .iter()
            .flat_map(|l| l.text.split_whitespace())
            .collect();
        let words: Vec<&str> = CAKE.split_whitespace().collect();
        assert_eq!(rebuilt, words);
    }
}

#[test]
fn oversized_word_gets_its_own_unsplit_line() {
    let mut m = measurer();
    let lines = wrap_text("a Supercalifragilistic b", params(40.0), &mut m);
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, ["a", "Supercalifragilistic", "b"]);
    assert!(lines[1].width > 40.0);
}

#[test]
fn leading_oversized_word_is_not_preceded_by_an_empty_line() {
    let mut m = measurer();
    let lines = wrap_text("Supercalifragilistic", params(10.0), &mut m);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].origin.y, 310.0);
}

#[test]
fn candidate_exactly_at_limit_still_fits() {
    let mut m = measurer();
    // "ab cd " is 6 chars -> 48 px.
    let lines = wrap_text("ab cd", params(48.0), &mut m);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "ab cd");
}

#[test]
fn whitespace_runs_collapse_and_empty_input_yields_nothing() {
    let mut m = measurer();
    assert!(wrap_text("", params(100.0), &mut m).is_empty());
    assert!(wrap_text("  \t\n ", params(100.0), &mut m).is_empty());

    let lines = wrap_text("  one\t two\nthree  ", params(1000.0), &mut m);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "one two three");
}

#[test]
fn long_input_keeps_advancing_without_a_line_cap() {
    let mut m = measurer();
    let text = "word ".repeat(500);
    let lines = wrap_text(&text, params(100.0), &mut m);
    // "word " is 40 px, two fit per 100 px line.
    assert_eq!(lines.len(), 250);
    let last = lines.last().unwrap();
    assert_eq!(last.origin.y, 310.0 + 249.0 * 20.0);
}

#[test]
fn measurer_sees_candidates_with_trailing_space() {
    struct Recorder(Vec<String>);
    impl TextMeasure for Recorder {
        fn measure(&mut self, text: &str, _size_px: f32) -> f32 {
            self.0.push(text.to_string());
            text.len() as f32
        }
    }

    let mut rec = Recorder(Vec::new());
    wrap_text("ab cd", params(1000.0), &mut rec);
    assert_eq!(rec.0, ["ab ", "ab cd "]);
}
