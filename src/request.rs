//! Building the `/concatenate` form body.
//!
//! The field list is produced in wire order; `api` turns it into a
//! `FormData` without reordering anything.

use std::fmt;
use std::str::FromStr;

pub const DEFAULT_OUTPUT_NAME: &str = "output.png";
pub const DEFAULT_SAVE_FOLDER: &str = "outputs";

/// A value picked from one of the form's fixed choice controls.
pub trait FormValue: Copy + PartialEq + FromStr<Err = UnknownValue> + 'static {
    const ALL: &'static [Self];

    /// Value as sent on the wire.
    fn as_str(self) -> &'static str;

    /// Text shown next to the control.
    fn label(self) -> &'static str;
}

macro_rules! form_value {
    ($ty:ident { $($variant:ident => ($s:literal, $label:literal)),+ $(,)? }) => {
        impl FormValue for $ty {
            const ALL: &'static [$ty] = &[$($ty::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $s),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $($ty::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok($ty::$variant),)+
                    other => Err(UnknownValue(other.to_string())),
                }
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValue(pub String);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Upload,
    Server,
}

form_value!(Mode {
    Upload => ("upload", "Upload files"),
    Server => ("server", "Server folder"),
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

form_value!(Orientation {
    Horizontal => ("horizontal", "Horizontal"),
    Vertical => ("vertical", "Vertical"),
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    Start,
    #[default]
    Center,
    End,
}

form_value!(Alignment {
    Start => ("start", "Start"),
    Center => ("center", "Center"),
    End => ("end", "End"),
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResizeMode {
    #[default]
    None,
    MatchHeight,
    MatchWidth,
    FitMax,
}

form_value!(ResizeMode {
    None => ("none", "Keep original sizes"),
    MatchHeight => ("match_height", "Match tallest height"),
    MatchWidth => ("match_width", "Match widest width"),
    FitMax => ("fit_max", "Fit within max size"),
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SaveOption {
    #[default]
    Download,
    Save,
}

form_value!(SaveOption {
    Download => ("download", "Download result"),
    Save => ("save", "Save on server"),
});

/// Processing options as typed into the form. Free-text fields are kept
/// verbatim; defaults are applied only when the body is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConcatOptions {
    pub orientation: Orientation,
    pub alignment: Alignment,
    pub resize_mode: ResizeMode,
    pub max_width: String,
    pub max_height: String,
    pub output_name: String,
    pub save_option: SaveOption,
    pub save_folder: String,
}

impl Default for ConcatOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            alignment: Alignment::default(),
            resize_mode: ResizeMode::default(),
            max_width: String::new(),
            max_height: String::new(),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            save_option: SaveOption::default(),
            save_folder: DEFAULT_SAVE_FOLDER.to_string(),
        }
    }
}

impl ConcatOptions {
    /// Name used for both the `output_name` field and a downloaded result.
    pub fn effective_output_name(&self) -> String {
        non_blank(&self.output_name).unwrap_or(DEFAULT_OUTPUT_NAME).to_string()
    }

    fn push_fields<F>(&self, mode: Mode, fields: &mut Vec<FormField<F>>) {
        fields.push(FormField::text("mode", mode.as_str()));
        fields.push(FormField::text("orientation", self.orientation.as_str()));
        fields.push(FormField::text("alignment", self.alignment.as_str()));
        fields.push(FormField::text("resize_mode", self.resize_mode.as_str()));
        if let Some(w) = non_blank(&self.max_width) {
            fields.push(FormField::text("max_width", w));
        }
        if let Some(h) = non_blank(&self.max_height) {
            fields.push(FormField::text("max_height", h));
        }
        fields.push(FormField::text("output_name", self.effective_output_name()));
        fields.push(FormField::text("save_option", self.save_option.as_str()));
        if self.save_option == SaveOption::Save {
            let folder = non_blank(&self.save_folder).unwrap_or(DEFAULT_SAVE_FOLDER);
            fields.push(FormField::text("save_folder", folder));
        }
    }
}

/// Inputs are sent verbatim; only an empty one counts as unset.
fn non_blank(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormField<F> {
    Text { name: &'static str, value: String },
    File {
        name: &'static str,
        filename: String,
        file: F,
    },
}

impl<F> FormField<F> {
    fn text(name: &'static str, value: impl Into<String>) -> Self {
        Self::Text {
            name,
            value: value.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => *name,
        }
    }
}

/// A validated `/concatenate` request, ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission<F> {
    pub fields: Vec<FormField<F>>,
    /// File name for a binary reply.
    pub download_name: String,
}

impl<F> Submission<F> {
    /// Upload mode: one `images` part per file, in the given order.
    pub fn uploads(options: &ConcatOptions, files: Vec<(String, F)>) -> Self {
        let mut fields = Vec::with_capacity(files.len() + 10);
        options.push_fields(Mode::Upload, &mut fields);
        fields.extend(files.into_iter().map(|(filename, file)| FormField::File {
            name: "images",
            filename,
            file,
        }));
        Self {
            fields,
            download_name: options.effective_output_name(),
        }
    }

    /// Server mode: the listed folder, then one `selected[]` per name.
    pub fn server(options: &ConcatOptions, folder: &str, names: Vec<String>) -> Self {
        let mut fields = Vec::with_capacity(names.len() + 11);
        options.push_fields(Mode::Server, &mut fields);
        fields.push(FormField::text("folder", folder));
        fields.extend(names.into_iter().map(|n| FormField::text("selected[]", n)));
        Self {
            fields,
            download_name: options.effective_output_name(),
        }
    }

    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|f| match f {
            FormField::Text { name: n, value } if *n == name => Some(value.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<F>(sub: &Submission<F>) -> Vec<&'static str> {
        sub.fields.iter().map(FormField::name).collect()
    }

    #[test]
    fn form_values_round_trip_their_control_values() {
        for m in ResizeMode::ALL {
            assert_eq!(m.as_str().parse::<ResizeMode>(), Ok(*m));
        }
        assert_eq!("sideways".parse::<Orientation>(), Err(UnknownValue("sideways".into())));
    }

    #[test]
    fn default_upload_fields_in_wire_order() {
        let sub = Submission::uploads(
            &ConcatOptions::default(),
            vec![("a.png".to_string(), 1u8), ("b.png".to_string(), 2u8)],
        );
        assert_eq!(
            names(&sub),
            vec![
                "mode",
                "orientation",
                "alignment",
                "resize_mode",
                "output_name",
                "save_option",
                "images",
                "images",
            ]
        );
        assert_eq!(sub.text_value("mode"), Some("upload"));
        assert_eq!(sub.text_value("alignment"), Some("center"));
        assert_eq!(sub.text_value("save_option"), Some("download"));
        assert_eq!(sub.download_name, "output.png");
    }

    #[test]
    fn optional_sizes_only_when_filled() {
        let opts = ConcatOptions {
            resize_mode: ResizeMode::FitMax,
            max_width: "800".into(),
            max_height: String::new(),
            ..ConcatOptions::default()
        };
        let sub = Submission::<()>::server(&opts, "imgs", vec!["x.png".into()]);
        assert_eq!(sub.text_value("max_width"), Some("800"));
        assert_eq!(sub.text_value("max_height"), None);
        assert_eq!(sub.text_value("resize_mode"), Some("fit_max"));
    }

    #[test]
    fn save_folder_only_when_saving_and_defaults_when_blank() {
        let mut opts = ConcatOptions {
            save_folder: "results".into(),
            ..ConcatOptions::default()
        };
        let sub = Submission::<()>::server(&opts, "f", vec!["a".into()]);
        assert_eq!(sub.text_value("save_folder"), None);

        opts.save_option = SaveOption::Save;
        let sub = Submission::<()>::server(&opts, "f", vec!["a".into()]);
        assert_eq!(sub.text_value("save_folder"), Some("results"));

        opts.save_folder.clear();
        let sub = Submission::<()>::server(&opts, "f", vec!["a".into()]);
        assert_eq!(sub.text_value("save_folder"), Some("outputs"));
        let pos = |n: &str| names(&sub).iter().position(|x| *x == n).unwrap();
        assert!(pos("save_option") < pos("save_folder"));
        assert!(pos("save_folder") < pos("folder"));
    }

    #[test]
    fn whitespace_inputs_are_sent_verbatim() {
        let opts = ConcatOptions {
            max_height: " ".into(),
            output_name: "  ".into(),
            save_option: SaveOption::Save,
            save_folder: " ".into(),
            ..ConcatOptions::default()
        };
        let sub = Submission::<()>::server(&opts, "f", vec!["a".into()]);
        assert_eq!(sub.text_value("max_height"), Some(" "));
        assert_eq!(sub.text_value("output_name"), Some("  "));
        assert_eq!(sub.text_value("save_folder"), Some(" "));
        assert_eq!(sub.download_name, "  ");
    }

    #[test]
    fn blank_output_name_becomes_default_for_field_and_download() {
        let opts = ConcatOptions {
            output_name: String::new(),
            ..ConcatOptions::default()
        };
        let sub = Submission::<()>::server(&opts, "f", vec!["a".into()]);
        assert_eq!(sub.text_value("output_name"), Some("output.png"));
        assert_eq!(sub.download_name, "output.png");

        let opts = ConcatOptions {
            output_name: "strip.jpg".into(),
            ..ConcatOptions::default()
        };
        let sub = Submission::<()>::server(&opts, "f", vec!["a".into()]);
        assert_eq!(sub.download_name, "strip.jpg");
    }

    #[test]
    fn server_fields_keep_selection_order() {
        let sub = Submission::<()>::server(
            &ConcatOptions::default(),
            "shots",
            vec!["z.png".into(), "a.png".into()],
        );
        let tail = sub.fields[sub.fields.len() - 3..].to_vec();
        assert_eq!(
            tail,
            vec![
                FormField::text("folder", "shots"),
                FormField::text("selected[]", "z.png"),
                FormField::text("selected[]", "a.png"),
            ]
        );
        assert_eq!(sub.text_value("mode"), Some("server"));
    }
}
