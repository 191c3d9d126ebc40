//! Marketing landing page.

use std::fmt::Write;

use super::{LOGIN_PATH, SIGNUP_PATH, layout, render};

const HOME_TEMPLATE: &str = include_str!("../../templates/home.html");

struct Feature {
    title: &'static str,
    body: &'static str,
}

struct Step {
    number: &'static str,
    title: &'static str,
    body: &'static str,
}

const FEATURES: [Feature; 3] = [
    Feature {
        title: "Verified Professionals Only",
        body: "Curated network of established beatmakers, artists, A&amp;R directors, labels, and publishers. \
               No noise. No amateurs. Just serious business.",
    },
    Feature {
        title: "Structured Beat Locking",
        body: "7-day temporary holds or definitive locks with automatic stems delivery workflows. \
               Clear commitments. No ambiguity.",
    },
    Feature {
        title: "UNRLSD as Publisher",
        body: "We act as the trusted music publisher, structuring and preparing works for professional exploitation. \
               Third-party integrity built in.",
    },
];

const STEPS: [Step; 3] = [
    Step {
        number: "01",
        title: "Browse",
        body: "Explore curated beat catalogs from verified producers. Filter by genre, BPM, and placement history.",
    },
    Step {
        number: "02",
        title: "Lock",
        body: "Secure exclusive rights with temporary (7-day) or definitive locks. Clear, professional commitments.",
    },
    Step {
        number: "03",
        title: "Stems",
        body: "Receive full stems within 5 days of definitive lock. UNRLSD handles publishing and rights management.",
    },
];

#[must_use]
pub fn render_home(year: i32) -> String {
    let mut features = String::new();
    for f in &FEATURES {
        let _ = writeln!(
            features,
            r#"      <div class="card"><h3>{}</h3><p class="muted">{}</p></div>"#,
            f.title, f.body
        );
    }

    let mut steps = String::new();
    for s in &STEPS {
        let _ = writeln!(
            steps,
            r#"      <div class="step"><div class="step-number">{}</div><h3>{}</h3><p class="muted">{}</p></div>"#,
            s.number, s.title, s.body
        );
    }

    let year = year.to_string();
    let body = render(
        HOME_TEMPLATE,
        &[
            ("SIGNUP_PATH", SIGNUP_PATH),
            ("LOGIN_PATH", LOGIN_PATH),
            ("FEATURES", &features),
            ("STEPS", &steps),
            ("YEAR", &year),
        ],
    );
    layout("Where Elite Producers Meet Top Artists", "", &body)
}
