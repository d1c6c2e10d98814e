//! External collaborators of the engine: the web-font stylesheet reference
//! and the static content tables. Raw inputs only: no loading or retry
//! logic, and the actual DOM mutations belong to the host.

use crate::core::Rgba8;

pub const FONT_STYLESHEET_URL: &str = "https://fonts.googleapis.com/css2?family=Instrument+Serif:ital@0;1&family=JetBrains+Mono:ital,wght@0,100..800;1,100..800&display=swap";

/// Mount/unmount bookkeeping for the stylesheet link: appended once on
/// mount, detached on unmount.
#[derive(Clone, Debug)]
pub struct FontStylesheet {
    url: String,
    mounted: bool,
}

impl FontStylesheet {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mounted: false,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Returns true when the host should append the link now.
    pub fn mount(&mut self) -> bool {
        let fresh = !self.mounted;
        self.mounted = true;
        fresh
    }

    /// Returns true when the host should detach the link now.
    pub fn unmount(&mut self) -> bool {
        let was = self.mounted;
        self.mounted = false;
        was
    }
}

impl Default for FontStylesheet {
    fn default() -> Self {
        Self::new(FONT_STYLESHEET_URL)
    }
}

/// A vibe-coding platform chip thrown at the hero wall.
#[derive(Clone, Copy, Debug)]
pub struct Platform {
    pub name: &'static str,
    pub color: Rgba8,
    /// Fly-in start offset in viewport widths/heights.
    pub start_x_vw: f64,
    pub start_y_vh: f64,
    pub delay: f64,
}

pub static PLATFORMS: [Platform; 6] = [
    Platform {
        name: "Lovable",
        color: Rgba8::opaque(0x3B, 0x82, 0xF6),
        start_x_vw: -100.0,
        start_y_vh: 20.0,
        delay: 0.0,
    },
    Platform {
        name: "Replit",
        color: Rgba8::opaque(0xF9, 0x73, 0x16),
        start_x_vw: 100.0,
        start_y_vh: -10.0,
        delay: 0.1,
    },
    Platform {
        name: "v0",
        color: Rgba8::opaque(0x00, 0x00, 0x00),
        start_x_vw: -80.0,
        start_y_vh: -40.0,
        delay: 0.2,
    },
    Platform {
        name: "Bolt.new",
        color: Rgba8::opaque(0xFA, 0xCC, 0x15),
        start_x_vw: 80.0,
        start_y_vh: 40.0,
        delay: 0.05,
    },
    Platform {
        name: "Base44",
        color: Rgba8::opaque(0x93, 0x33, 0xEA),
        start_x_vw: -20.0,
        start_y_vh: 80.0,
        delay: 0.15,
    },
    Platform {
        name: "GitHub Copilot",
        color: Rgba8::opaque(0x1F, 0x29, 0x37),
        start_x_vw: 50.0,
        start_y_vh: -80.0,
        delay: 0.25,
    },
];

/// A showcased project card in the gallery.
#[derive(Clone, Copy, Debug)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub url: &'static str,
    pub image: &'static str,
}

pub static PROJECTS: [Project; 3] = [
    Project {
        title: "AI Value Chain",
        description: "Sustainability questions & analysis.",
        url: "https://ai-value-chain-equity.vibe-playground.com/",
        image: "/projects/Ai-valuechain.jpeg",
    },
    Project {
        title: "The Digital Public Infrastructure 101",
        description: "Educational primer on DPI.",
        url: "https://intro-dpi.vibe-playground.com/",
        image: "/projects/DPI.jpeg",
    },
    Project {
        title: "TraMonti e Mare",
        description: "Our vacation rental in South Italy.",
        url: "https://www.tra-montiemare.it/",
        image: "/projects/tra-montiemare.jpeg",
    },
];

#[derive(Clone, Copy, Debug)]
pub struct Lesson {
    pub number: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

pub static LESSONS: [Lesson; 3] = [
    Lesson {
        number: "01.",
        title: "Iterate Elsewhere, Execute Here",
        body: "Define and iterate prompts in other LLMs, and then insert them in vibe-coding tools.",
    },
    Lesson {
        number: "02.",
        title: "Specificity > Detail",
        body: "The focus must be on defining highly specific functional behavior over verbose, low-value implementation details.",
    },
    Lesson {
        number: "03.",
        title: "The Nuke Option",
        body: "A procedural safeguard: the willingness to discard complex, failing feature branches entirely in favor of a simpler, faster-to-implement alternative.",
    },
];

#[derive(Clone, Copy, Debug)]
pub struct WorkflowStep {
    pub step: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

pub static WORKFLOW_STEPS: [WorkflowStep; 3] = [
    WorkflowStep {
        step: "01",
        title: "Drafting & Hardening",
        body: "Architectural experimentation in a flat LLM space. Focus on logic and recursive self-correction without execution constraints.",
    },
    WorkflowStep {
        step: "02",
        title: "External Validation",
        body: "Independent audit to prevent the 'echo chamber' effect. Hardened logic is critiqued by a separate model for edge cases.",
    },
    WorkflowStep {
        step: "03",
        title: "Execution / Injection",
        body: "Non-negotiable finality. Pre-validated code is injected for instant execution. Zero architectural failures expected.",
    },
];

pub const AUTHOR_NAME: &str = "Francesco Stabilito";
pub const AUTHOR_LINK: &str = "https://www.linkedin.com/in/frastab/";

pub const WARNING_TEXT: &str = "But what happens when your always-on copilot doesn't challenge your assumptions? That's when the Vibe Trap takes hold.";
