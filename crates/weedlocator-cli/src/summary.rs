use std::path::Path;

use console::Style;
use weedlocator_core::annotate::AnnotationStyle;
use weedlocator_core::detection::{Algorithm, DetectionConfig};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_detection_summary(config: &DetectionConfig, inputs: usize, output: Option<&Path>) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Weed Detection"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(14)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Images"),
        s.value.apply_to(inputs)
    );
    match output {
        Some(dir) => println!(
            "  {:<14}{}",
            s.label.apply_to("Output"),
            s.path.apply_to(dir.display())
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Output"),
            s.disabled.apply_to("next to inputs")
        ),
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Algorithm"),
        s.method.apply_to(config.algorithm)
    );
    println!();

    println!("  {}", s.header.apply_to("Thresholds"));
    if config.algorithm != Algorithm::Hsv {
        print_range(&s, "ExG", config.exg_min, config.exg_max);
    }
    if config.algorithm != Algorithm::Exg {
        let hue = if config.invert_hue {
            format!("outside {}-{}", config.hue_min, config.hue_max)
        } else {
            format!("{}-{}", config.hue_min, config.hue_max)
        };
        println!("    {:<12}{}", s.label.apply_to("Hue"), s.value.apply_to(hue));
        print_range(&s, "Saturation", config.saturation_min, config.saturation_max);
        print_range(&s, "Brightness", config.brightness_min, config.brightness_max);
    }
    let area = match config.max_area {
        Some(max) => format!("{}-{} px", config.min_area, max),
        None => format!(">= {} px", config.min_area),
    };
    println!("    {:<12}{}", s.label.apply_to("Area"), s.value.apply_to(area));
    if config.close_iterations > 0 {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Closing"),
            s.value.apply_to(format!("{}x", config.close_iterations))
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Closing"),
            s.disabled.apply_to("disabled")
        );
    }
    println!();

    print_annotation_section(&s, &config.annotation);
}

fn print_range(s: &Styles, name: &str, min: u8, max: u8) {
    println!(
        "    {:<12}{}",
        s.label.apply_to(name),
        s.value.apply_to(format!("{min}-{max}"))
    );
}

fn print_annotation_section(s: &Styles, style: &AnnotationStyle) {
    println!("  {}", s.header.apply_to("Annotation"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Box"),
        s.value.apply_to(format!(
            "BGR {:?}, {} px",
            style.box_color, style.thickness
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Marker"),
        s.value.apply_to(format!(
            "BGR {:?}, radius {}",
            style.marker_color, style.marker_radius
        ))
    );
    if style.draw_labels {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Labels"),
            s.method.apply_to("on")
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Labels"),
            s.disabled.apply_to("off")
        );
    }
    println!();
}
