// ABOUTME: Printable page layout for a profile and its plan
// ABOUTME: Places styled lines on A4 pages with fixed line heights and page-break thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

//! # Plan Document
//!
//! Lays a plan out on 210 x 297 mm pages. Coordinates are millimetres from
//! the top-left corner. Content starts at y = 20 and a new page is started
//! when the cursor passes a threshold before the next block is placed:
//!
//! | Block                          | Break when y > |
//! |--------------------------------|----------------|
//! | day, exercise, meal, item, tip | 250            |
//! | Diet and Tips headings         | 200            |
//! | motivation quote               | 240            |
//!
//! Text is wrapped at the content width (page width minus 40 mm) using a
//! fixed character count for the body font.

use std::fmt::Write;
use std::mem;

use crate::models::{Plan, Profile};

/// Page width in millimetres
pub const PAGE_WIDTH: u32 = 210;
/// Page height in millimetres
pub const PAGE_HEIGHT: u32 = 297;
/// Left margin in millimetres
pub const MARGIN: u32 = 20;
/// First baseline on every page
pub const TOP: u32 = 20;
/// Indent for bullet lines under a heading
pub const INDENT: u32 = 25;
/// Break threshold for ordinary blocks
pub const BREAK_Y: u32 = 250;
/// Break threshold for the Diet and Tips headings
pub const SECTION_BREAK_Y: u32 = 200;
/// Break threshold for the closing quote
pub const MOTIVATION_BREAK_Y: u32 = 240;
/// Characters of body text that fit in the content width
pub const WRAP_COLUMNS: usize = 95;

const TITLE: &str = "AI Fitness Coach - Your Personalized Plan";
const TITLE_STEP: u32 = 15;
const PROFILE_STEP: u32 = 7;
const PROFILE_GAP: u32 = 15;
const HEADING_STEP: u32 = 10;
const SUBHEADING_STEP: u32 = 6;
const LINE_STEP: u32 = 5;
const TIP_EXTRA: u32 = 2;
const GAP: u32 = 5;

/// Typeface role of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Document title, 22 pt bold
    Title,
    /// Profile summary, 12 pt
    Body,
    /// Section heading, 16 pt bold
    Heading,
    /// Day or meal heading, 10 pt bold
    SubHeading,
    /// Bullet and detail text, 10 pt
    Detail,
    /// Closing quote, 10 pt italic
    Quote,
}

/// Horizontal anchoring of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// `x` is the left edge
    Left,
    /// `x` is the centre
    Center,
}

/// One positioned line of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLine {
    /// Horizontal position in millimetres
    pub x: u32,
    /// Baseline in millimetres from the page top
    pub y: u32,
    /// Anchoring of `x`
    pub align: Align,
    /// Typeface role
    pub style: LineStyle,
    /// Text content
    pub text: String,
}

/// One page of the document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPage {
    /// Lines in placement order
    pub lines: Vec<DocumentLine>,
}

impl DocumentPage {
    /// Whether any line on the page contains `needle`
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.text.contains(needle))
    }
}

/// A laid-out plan ready to print or save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDocument {
    pages: Vec<DocumentPage>,
    file_name: String,
}

impl PlanDocument {
    /// Lay out `plan` for `profile`
    #[must_use]
    pub fn layout(profile: &Profile, plan: &Plan) -> Self {
        let mut cursor = Cursor::new();
        cursor.header(profile);
        cursor.workout(plan);
        cursor.diet(plan);
        cursor.tips(plan);
        cursor.motivation(plan);

        Self {
            pages: cursor.pages,
            file_name: file_name(&profile.name),
        }
    }

    /// Pages in order
    #[must_use]
    pub fn pages(&self) -> &[DocumentPage] {
        &self.pages
    }

    /// Suggested file name for the saved document
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Plain-text rendering, pages separated by form feeds
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (index, page) in self.pages.iter().enumerate() {
            if index > 0 {
                out.push('\u{c}');
            }
            for line in &page.lines {
                let text = match line.style {
                    LineStyle::Title | LineStyle::Heading => line.text.to_uppercase(),
                    _ => line.text.clone(),
                };
                let pad = match line.align {
                    Align::Left => line.x.saturating_sub(MARGIN) as usize / 5 * 2,
                    Align::Center => WRAP_COLUMNS.saturating_sub(text.chars().count()) / 2,
                };
                let _ = writeln!(out, "{:pad$}{text}", "");
            }
        }
        out
    }
}

/// `{name}_Fitness_Plan.txt`, with every character of `name` that is not a
/// letter, digit, space, `_` or `-` replaced by `_`
#[must_use]
pub fn file_name(name: &str) -> String {
    let safe: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{safe}_Fitness_Plan.txt")
}

/// Greedy word wrap at `width` characters; overlong words are split
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let used = current.chars().count();
        if used > 0 && used + 1 + word.len() > width {
            lines.push(mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

struct Cursor {
    pages: Vec<DocumentPage>,
    y: u32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![DocumentPage::default()],
            y: TOP,
        }
    }

    fn break_if_past(&mut self, threshold: u32) {
        if self.y > threshold {
            self.pages.push(DocumentPage::default());
            self.y = TOP;
        }
    }

    fn put(&mut self, x: u32, y: u32, align: Align, style: LineStyle, text: String) {
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(DocumentLine {
                x,
                y,
                align,
                style,
                text,
            });
        }
    }

    fn line(&mut self, x: u32, style: LineStyle, text: String, step: u32) {
        self.put(x, self.y, Align::Left, style, text);
        self.y += step;
    }

    /// Place wrapped text starting at the cursor; returns the line count
    fn wrapped(&mut self, x: u32, align: Align, style: LineStyle, text: &str) -> u32 {
        let lines = wrap(text, WRAP_COLUMNS);
        let count = u32::try_from(lines.len()).unwrap_or(u32::MAX);
        for (offset, line) in (0..).zip(lines) {
            self.put(x, self.y + offset * LINE_STEP, align, style, line);
        }
        count
    }

    fn header(&mut self, profile: &Profile) {
        self.put(PAGE_WIDTH / 2, self.y, Align::Center, LineStyle::Title, TITLE.to_owned());
        self.y += TITLE_STEP;

        self.line(MARGIN, LineStyle::Body, format!("Name: {}", profile.name), PROFILE_STEP);
        self.line(
            MARGIN,
            LineStyle::Body,
            format!(
                "Age: {} | Gender: {} | Height: {}cm | Weight: {}kg",
                profile.age, profile.gender, profile.height_cm, profile.weight_kg
            ),
            PROFILE_STEP,
        );
        self.line(
            MARGIN,
            LineStyle::Body,
            format!(
                "Goal: {} | Level: {} | Location: {}",
                profile.fitness_goal, profile.fitness_level, profile.workout_location
            ),
            PROFILE_GAP,
        );
    }

    fn workout(&mut self, plan: &Plan) {
        self.line(MARGIN, LineStyle::Heading, "Workout Plan".to_owned(), HEADING_STEP);

        for day in &plan.workout_plan {
            self.break_if_past(BREAK_Y);
            self.line(MARGIN, LineStyle::SubHeading, day.day.clone(), SUBHEADING_STEP);

            for exercise in &day.exercises {
                self.break_if_past(BREAK_Y);
                let text = format!(
                    "\u{2022} {}: {} sets x {} reps, rest {}",
                    exercise.name, exercise.sets, exercise.reps, exercise.rest_time
                );
                let count = self.wrapped(INDENT, Align::Left, LineStyle::Detail, &text);
                self.y += count * LINE_STEP;
            }
            self.y += GAP;
        }
    }

    fn diet(&mut self, plan: &Plan) {
        self.break_if_past(SECTION_BREAK_Y);
        self.line(MARGIN, LineStyle::Heading, "Diet Plan".to_owned(), HEADING_STEP);

        for (kind, meal) in plan.diet_plan.meals() {
            self.break_if_past(BREAK_Y);
            self.line(
                MARGIN,
                LineStyle::SubHeading,
                format!("{}: {}", kind.as_str().to_uppercase(), meal.name),
                SUBHEADING_STEP,
            );

            for item in &meal.items {
                self.break_if_past(BREAK_Y);
                self.line(INDENT, LineStyle::Detail, format!("\u{2022} {item}"), LINE_STEP);
            }

            let calories = meal.calories.as_deref().filter(|v| !v.is_empty());
            let protein = meal.protein.as_deref().filter(|v| !v.is_empty());
            if calories.is_some() || protein.is_some() {
                self.line(
                    INDENT,
                    LineStyle::Detail,
                    format!(
                        "Nutrition: {} | Protein: {}",
                        calories.unwrap_or("N/A"),
                        protein.unwrap_or("N/A")
                    ),
                    LINE_STEP,
                );
            }
            self.y += GAP;
        }
    }

    fn tips(&mut self, plan: &Plan) {
        self.break_if_past(SECTION_BREAK_Y);
        self.line(
            MARGIN,
            LineStyle::Heading,
            "Tips & Recommendations".to_owned(),
            HEADING_STEP,
        );

        for tip in &plan.tips {
            self.break_if_past(BREAK_Y);
            let count = self.wrapped(MARGIN, Align::Left, LineStyle::Detail, &format!("\u{2022} {tip}"));
            self.y += count * LINE_STEP + TIP_EXTRA;
        }
    }

    fn motivation(&mut self, plan: &Plan) {
        self.y += GAP;
        self.break_if_past(MOTIVATION_BREAK_Y);
        let quote = format!("\"{}\"", plan.motivation);
        self.wrapped(PAGE_WIDTH / 2, Align::Center, LineStyle::Quote, &quote);
    }
}
