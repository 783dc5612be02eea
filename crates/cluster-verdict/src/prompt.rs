//! Instruction text and verdict labels for the remote model.
//!
//! Two variants exist. Full-frame captures get general layout guidance; small
//! crops that were upscaled before comparison ("enlarged icons") get guidance
//! focused on the central element. Label strings are matched literally by
//! downstream consumers, so they are kept byte-for-byte.

use serde::Serialize;

use crate::capture::Raster;

/// Minimum edge length, in pixels, for the full-frame instructions.
pub const FULL_FRAME_MIN_PX: u32 = 224;

/// Labels offered for full-frame captures.
pub const FULL_FRAME_LABELS: [&str; 7] = [
    "Verdict: Same images",
    "Verdict: Similar images with insignificant differences",
    "Verdict: Similar images with slight/major misalignment of element(s)",
    "Verdict: Similar images but with one or few elements missing",
    "Verdict: Similar images but with significant differences",
    "Verdict: Dissimilar/Uncomparable images",
    "Verdict: Inconclusive/Low-confidence findings; human discernment required",
];

/// Labels offered for enlarged icon crops.
pub const ENLARGED_ICON_LABELS: [&str; 11] = [
    "Verdict: Same images",
    "Verdict: Similar images with insignificant differences",
    "Verdict: Similar images with major misalignment of element(s)",
    "Verdict: Similar images but with significant differences",
    "Verdict: Incomplete/Cropped central element",
    "Verdict: Central element has different color",
    "Verdict: Central text is different",
    "Verdict: Central text's font is different",
    "Verdict: Central element's shape is different",
    "Verdict: Dissimilar/Uncomparable images",
    "Verdict: Inconclusive/Low-confidence findings; human discernment required",
];

const PREAMBLE: &str = "\
You are a car cluster screen validator. Your task is to assess whether the graphics shown on the screen contain any visual mistakes.

You are provided with:
1. An actual (to-be-checked) image.
2. A reference (expected) image.";

const FULL_FRAME_GUIDANCE: &str = "\
---

### What to flag as significant:
- Misalignments of functional elements (icons, text, telltales, etc.).
- Missing elements, texts, symbols, or icons (even if the overall images appear the same). This is a very critical bug.
- Font differnces (style, size, color, etc.).
- Textual differences (Use OCR to extract text and match).
- Shape, size, or contrasting color (e.g., red vs. green) inconsistencies in key visuals.
- Incomplete, overlapping, or cropped elements.

### What to ignore as insignificant:
- Minor brightness or color tone differences (e.g., cyan vs. turquoise).
- Decorative background variations like misaligned dots or patterns.";

const ENLARGED_ICON_GUIDANCE: &str = "\
### What to flag as significant:
- Incomplete, overlapping, or cropped central element, treat it as a critical bug. This is a common and serious case.
- Color, shape, and size inconsistencies in key visuals. A color difference is considered a major bug (although very close shades of the same color are tolerable).
- Completely missing central element, text, symbol, or icon.
- Font differnces (style, size, weight, etc.) - again a critical bug.
- Textual differences (Use OCR to extract text and match).
- Color, shape and size inconsistencies in key visuals.
- Major Misalignment of the central element (icon, text, telltale, etc.).

### What to ignore as insignificant:
- Decorative background variations like misaligned dots or different patterns.

💡 Tip:  These images were originally very small but were enlarged and enhanced before being sent to you. Examples include the ‘STOP’ icon image, battery icon image, etc.
Usually, these images are the same, with only insignificant misalignment differences.
However, sometimes additional pixels from nearby elements — not present in the reference image — get captured in the frame of the actual image.
After enlargement, they may appear large and significant, but since they are meaningless fragments, they should be ignored and only central element should be focused on.";

const VERDICT_REQUEST: &str = "\
---

Based on your analysis:
- Briefly summarize the visual difference in one or two lines.
- Provide one of the following **verdicts** in the **next line only**:";

const CLOSING: &str = "Avoid any formatting in your output.";

/// Which instruction set a pair of captures gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    FullFrame,
    EnlargedIcon,
}

impl SizeClass {
    /// Classify a capture pair.
    ///
    /// NOTE: the check is asymmetric. It reads the *actual* image's width and
    /// the *reference* image's height; the other two edges are ignored.
    pub fn classify(actual: &dyn Raster, reference: &dyn Raster) -> Self {
        if actual.width() >= FULL_FRAME_MIN_PX && reference.height() >= FULL_FRAME_MIN_PX {
            SizeClass::FullFrame
        } else {
            SizeClass::EnlargedIcon
        }
    }

    /// Labels the model may answer with.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            SizeClass::FullFrame => &FULL_FRAME_LABELS,
            SizeClass::EnlargedIcon => &ENLARGED_ICON_LABELS,
        }
    }

    /// Full instruction text sent alongside the two images.
    pub fn instructions(self) -> String {
        let guidance = match self {
            SizeClass::FullFrame => FULL_FRAME_GUIDANCE,
            SizeClass::EnlargedIcon => ENLARGED_ICON_GUIDANCE,
        };

        let mut text = format!("{PREAMBLE}\n\n{guidance}\n\n{VERDICT_REQUEST}\n\n");
        for label in self.labels() {
            text.push_str(&format!("- '{label}'\n"));
        }
        text.push('\n');
        text.push_str(CLOSING);
        text
    }

    /// Snake-case name used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            SizeClass::FullFrame => "full_frame",
            SizeClass::EnlargedIcon => "enlarged_icon",
        }
    }
}

/// Find the verdict label a model answer ended with.
///
/// Scans from the last line upwards and returns the first line that, once
/// surrounding whitespace, a leading `-` list marker and surrounding quotes
/// are stripped, is one of the labels of `class`. Comparators never validate
/// their output; this is for callers.
pub fn find_label(text: &str, class: SizeClass) -> Option<&'static str> {
    text.lines().rev().find_map(|line| {
        let candidate = line
            .trim()
            .trim_start_matches('-')
            .trim()
            .trim_matches(|c| c == '\'' || c == '"')
            .trim();
        class.labels().iter().copied().find(|l| *l == candidate)
    })
}
