/* Static portfolio copy. Layout decides sizing/spacing per kind; the tables
here only carry the words, like a credits scroller. */

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Section heading inside the body, drawn with an underline rule.
    Heading,
    /// Boxed sub-heading (skills boxes, education entries).
    Subheading,
    /// Regular copy text.
    Body,
    /// Monospace list entry, indented.
    Mono,
    /// Vertical gap.
    Spacer,
}

#[derive(Clone, Copy)]
pub struct ContentLine {
    pub kind: LineKind,
    pub text: &'static str,
}

const fn heading(text: &'static str) -> ContentLine {
    ContentLine {
        kind: LineKind::Heading,
        text,
    }
}

const fn subheading(text: &'static str) -> ContentLine {
    ContentLine {
        kind: LineKind::Subheading,
        text,
    }
}

const fn body(text: &'static str) -> ContentLine {
    ContentLine {
        kind: LineKind::Body,
        text,
    }
}

const fn mono(text: &'static str) -> ContentLine {
    ContentLine {
        kind: LineKind::Mono,
        text,
    }
}

const fn spacer() -> ContentLine {
    ContentLine {
        kind: LineKind::Spacer,
        text: "",
    }
}

/// Header band, two lines: big then small.
pub const MAIN_HEADER: (&str, &str) = ("SYSTEM", "ENGINEER");
pub const ABOUT_HEADER: (&str, &str) = ("ABOUT", "ME");

pub const MAIN_LINES: &[ContentLine] = &[
    heading("INFRASTRUCTURE_ARCHITECT"),
    body("I DESIGN, IMPLEMENT AND MAINTAIN ROBUST SYSTEM"),
    body("ARCHITECTURES USING CLOUD TECHNOLOGIES,"),
    body("CONTAINERIZATION, AND AUTOMATION."),
    body("SPECIALIZING IN SCALABLE INFRASTRUCTURE,"),
    body("SECURITY, AND PERFORMANCE OPTIMIZATION."),
    spacer(),
    subheading("INFRASTRUCTURE"),
    mono("AWS/AZURE/GCP"),
    mono("KUBERNETES"),
    mono("DOCKER"),
    mono("TERRAFORM"),
    spacer(),
    subheading("OPERATIONS"),
    mono("CI/CD PIPELINES"),
    mono("MONITORING"),
    mono("SECURITY"),
    mono("LINUX/UNIX"),
    spacer(),
    subheading("AUTOMATION & SCRIPTING"),
    mono("PYTHON"),
    mono("BASH"),
    mono("ANSIBLE"),
    mono("JENKINS"),
];

pub const ABOUT_LINES: &[ContentLine] = &[
    heading("WHO_AM_I"),
    body("LOW-LEVEL PROGRAMMING ENTHUSIAST WITH A PASSION"),
    body("FOR UNDERSTANDING HOW SYSTEMS WORK FROM THE"),
    body("GROUND UP."),
    body("CURRENTLY FOCUSED ON OPERATING SYSTEM DEVELOPMENT,"),
    body("COMPILER DESIGN, AND PERFORMANCE OPTIMIZATION."),
    spacer(),
    subheading("EDUCATION"),
    body("B.S. COMPUTER SCIENCE"),
    mono("TECHNICAL UNIVERSITY | 2020-2024"),
    body("SYSTEMS PROGRAMMING CERTIFICATION"),
    mono("ONLINE INSTITUTE | 2023"),
    spacer(),
    subheading("PERSONAL PROJECTS"),
    body("MINI OS KERNEL"),
    mono("A minimal operating system kernel in C and Assembly"),
    body("CUSTOM COMPILER"),
    mono("A compiler for a small language targeting x86"),
    body("EMBEDDED SYSTEMS TOOLKIT"),
    mono("Tools for working with microcontrollers"),
];

/* navigation / call-to-action / footer */

pub const NAV_TITLE: &str = "NAVIGATION:";
pub const NAV_MAIN: &str = "[1] MAIN";
pub const NAV_ABOUT: &str = "[2] ABOUT";
pub const STATUS_LINE: &str = "SELECT OPTION TO CONTINUE...";
pub const CTA_PROJECTS: &str = "VIEW PROJECTS";
pub const CTA_CONTACT: &str = "CONTACT ME";
pub const FOOTER_COPYRIGHT: &str = "(C) 2025 SYSTEM_ENGINEER";
pub const FOOTER_LINKS: &str = "GITHUB  LINKEDIN  TWITTER";
