//! Ready-made edit instructions, grouped into editor tabs

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub label: &'static str,
    pub prompt: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PresetTab {
    pub name: &'static str,
    pub presets: &'static [Preset],
}

const fn preset(label: &'static str, prompt: &'static str, description: &'static str) -> Preset {
    Preset {
        label,
        prompt,
        description,
    }
}

const FILTERS: &[Preset] = &[
    preset("Vintage Polaroid", "Make it look like a vintage polaroid photo with soft colors", "Retro instant camera look"),
    preset("Black & White", "Convert to dramatic high-contrast black and white photography", "Classic monochrome"),
    preset("Sepia Tone", "Apply an antique sepia tone filter", "Old western style"),
    preset("Pencil Sketch", "Convert this image into a detailed charcoal pencil sketch", "Hand-drawn look"),
    preset("Watercolor", "Turn this image into a soft, colorful watercolor painting", "Artistic painting"),
    preset("Oil Painting", "Turn this image into a textured oil painting", "Classic canvas art"),
    preset("Cyberpunk Neon", "Apply a cyber-punk neon filter with pink and blue glow", "Futuristic aesthetic"),
];

const SCENES: &[Preset] = &[
    preset("Outer Space", "Place the subject floating in outer space with galaxies in the background", "Cosmic adventure"),
    preset("Fantasy Forest", "Transform the background into a glowing magical forest", "Fairytale setting"),
    preset("Tropical Beach", "Place the subject on a sunny tropical beach with palm trees", "Island vacation"),
    preset("Winter Wonderland", "Add a snowy winter scene background with falling snow", "Snowy scenery"),
    preset("Underwater", "Reimagine this scene as if it is underwater with coral reefs", "Deep sea dive"),
    preset("Superhero", "Make the subject look like a superhero in a comic book style", "Action hero style"),
];

const RETOUCH: &[Preset] = &[
    preset("Auto Enhance", "Enhance lighting, contrast, and white balance for a professional look", "Quick fix"),
    preset("Studio Lighting", "Apply professional studio softbox lighting to the subject", "Portrait lighting"),
    preset("Vibrant Colors", "Increase color vibrancy and saturation significantly", "Pop the colors"),
    preset("Warm & Cozy", "Apply a warm, golden hour lighting effect", "Sunset feel"),
    preset("Cool & Moody", "Apply a cool, cinematic blue tone", "Dramatic atmosphere"),
];

pub const TABS: &[PresetTab] = &[
    PresetTab {
        name: "Artistic Filters",
        presets: FILTERS,
    },
    PresetTab {
        name: "Fun Scenes",
        presets: SCENES,
    },
    PresetTab {
        name: "Retouch",
        presets: RETOUCH,
    },
];

/// Look a preset up by label, ignoring case
pub fn find(label: &str) -> Option<&'static Preset> {
    let label = label.trim();
    TABS.iter()
        .flat_map(|tab| tab.presets.iter())
        .find(|p| p.label.eq_ignore_ascii_case(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_find_is_case_insensitive() {
        let p = find("sepia tone").unwrap();
        assert_eq!(p.prompt, "Apply an antique sepia tone filter");
        assert!(find("Sepia").is_none());
    }

    #[test]
    fn test_labels_are_unique() {
        let labels: Vec<_> = TABS.iter().flat_map(|t| t.presets.iter().map(|p| p.label)).collect();
        let unique: HashSet<_> = labels.iter().collect();
        assert_eq!(labels.len(), unique.len());
        assert_eq!(labels.len(), 18);
    }
}
