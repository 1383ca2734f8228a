//! Decorative content of the landing page.

use serde::Serialize;

/// One icon tile of the scrolling marquee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct Icon {
    /// Accessible name.
    pub label: &'static str,
    /// Tabler icon class.
    pub class: &'static str,
    /// Tailwind color classes.
    pub color: &'static str,
}

const fn icon(label: &'static str, class: &'static str, color: &'static str) -> Icon {
    Icon {
        label,
        class,
        color,
    }
}

const REACT: Icon = icon("React", "ti-brand-react", "text-blue-500");
const TYPESCRIPT: Icon = icon("TypeScript", "ti-brand-typescript", "text-blue-600");
const NODEJS: Icon = icon("Node.js", "ti-brand-nodejs", "text-green-600");
const GITHUB: Icon = icon("GitHub", "ti-brand-github", "text-gray-800 dark:text-white");

/// Marquee columns: frontend, frameworks, backend, data and devops,
/// package managers, and a repeat of the favourites.
pub(crate) const ICON_COLUMNS: [[Icon; 4]; 6] = [
    [
        REACT,
        icon("HTML5", "ti-brand-html5", "text-orange-500"),
        icon("CSS3", "ti-brand-css3", "text-blue-600"),
        icon("JavaScript", "ti-brand-javascript", "text-yellow-500"),
    ],
    [
        icon("Next.js", "ti-brand-nextjs", "text-gray-800 dark:text-white"),
        TYPESCRIPT,
        icon("Tailwind CSS", "ti-brand-tailwind", "text-cyan-500"),
        icon("VS Code", "ti-brand-vscode", "text-blue-500"),
    ],
    [
        NODEJS,
        icon("Server", "ti-server", "text-gray-600"),
        icon("API", "ti-api", "text-purple-500"),
        icon("Cloud", "ti-cloud", "text-blue-400"),
    ],
    [
        icon("Database", "ti-database", "text-blue-700"),
        icon("MongoDB", "ti-brand-mongodb", "text-green-500"),
        icon("Docker", "ti-brand-docker", "text-blue-500"),
        icon("Git", "ti-brand-git", "text-orange-600"),
    ],
    [
        GITHUB,
        icon("npm", "ti-brand-npm", "text-red-500"),
        icon("pnpm", "ti-brand-pnpm", "text-orange-500"),
        icon("Figma", "ti-brand-figma", "text-purple-500"),
    ],
    [REACT, TYPESCRIPT, NODEJS, GITHUB],
];

/// Each column repeats its icons so the scroll loops seamlessly.
const REPEAT: usize = 4;

const DOT_COUNT: usize = 20;

/// A marquee column as the template renders it.
#[derive(Debug, Serialize)]
pub(crate) struct IconColumn {
    pub animation: &'static str,
    pub duration: String,
    pub delay: String,
    pub items: Vec<Icon>,
}

/// A floating background dot, positioned in percent.
#[derive(Debug, Serialize)]
pub(crate) struct Dot {
    pub left: usize,
    pub top: usize,
    pub duration: String,
    pub delay: String,
}

/// Format tenths of a second as a CSS time (`65` -> `"6.5s"`).
fn seconds(tenths: usize) -> String {
    if tenths % 10 == 0 {
        format!("{}s", tenths / 10)
    } else {
        format!("{}.{}s", tenths / 10, tenths % 10)
    }
}

/// Columns alternate direction, starting upward; later columns run slower
/// and start later.
pub(crate) fn icon_columns() -> Vec<IconColumn> {
    ICON_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, items)| IconColumn {
            animation: if i % 2 == 0 { "scroll-up" } else { "scroll-down" },
            duration: seconds(60 + i * 5),
            delay: seconds(i * 3),
            items: items.repeat(REPEAT),
        })
        .collect()
}

/// Dots at fixed pseudo-random positions so the page renders identically
/// every time.
pub(crate) fn floating_dots() -> Vec<Dot> {
    (0..DOT_COUNT)
        .map(|i| Dot {
            left: (i * 62 + 13) % 100,
            top: (i * 37 + 29) % 100,
            duration: seconds(40 + (i * 7) % 21),
            delay: seconds((i * 11) % 21),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_seconds() {
        assert_eq!(seconds(60), "6s");
        assert_eq!(seconds(65), "6.5s");
        assert_eq!(seconds(3), "0.3s");
    }

    #[test]
    fn test_icon_columns_timing() {
        let columns = icon_columns();
        let timing: Vec<_> = columns
            .iter()
            .map(|c| (c.animation, c.duration.as_str(), c.delay.as_str()))
            .collect();
        assert_eq!(
            timing,
            [
                ("scroll-up", "6s", "0s"),
                ("scroll-down", "6.5s", "0.3s"),
                ("scroll-up", "7s", "0.6s"),
                ("scroll-down", "7.5s", "0.9s"),
                ("scroll-up", "8s", "1.2s"),
                ("scroll-down", "8.5s", "1.5s"),
            ]
        );
    }

    #[test]
    fn test_icon_columns_repeat_items() {
        let columns = icon_columns();
        assert_eq!(columns[0].items.len(), 16);
        assert_eq!(columns[0].items[4], REACT);
        assert_eq!(columns[5].items[3], GITHUB);
    }

    #[test]
    fn test_floating_dots_are_deterministic() {
        let dots = floating_dots();
        assert_eq!(dots.len(), DOT_COUNT);
        assert!(dots.iter().all(|d| d.left < 100 && d.top < 100));
        assert_eq!(
            dots.iter().map(|d| d.left).collect::<Vec<_>>(),
            floating_dots().iter().map(|d| d.left).collect::<Vec<_>>()
        );
    }
}
