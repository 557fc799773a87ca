use std::io::Write;

use anyhow::{Context, Result};
use handlebars::handlebars_helper;
use serde::Serialize;
use timecode::{Decoded, Description, Variant};

#[derive(Debug, Clone, PartialEq)]
pub enum Format {
    Json,
    Text,
}

impl clap::ValueEnum for Format {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Json, Self::Text]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Json => Some(clap::builder::PossibleValue::new("json")),
            Self::Text => Some(clap::builder::PossibleValue::new("text")),
        }
    }
}

#[derive(Debug, Serialize)]
struct Info {
    variant: Variant,
    timecode: Decoded,
    description: Description,
}

pub fn describe<W: Write>(variant: Variant, code: &str, format: &Format, out: &mut W) -> Result<()> {
    let decoded = variant
        .decode(code)
        .with_context(|| format!("decoding {code:?} as {variant}"))?;
    let info = Info {
        variant,
        timecode: decoded,
        description: decoded.describe(),
    };

    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, &info).context("serializing to json")?;
            writeln!(out).context("writing to stdout")
        }
        Format::Text => {
            let data = render_text(&info).context("serializing description")?;
            out.write_all(data.as_bytes()).context("writing to stdout")
        }
    }
}

fn render_text(info: &Info) -> Result<String> {
    handlebars_helper!(left_pad: |width: u64, v: Json| {
        let v = match v {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            _ => v.to_string(),
        };
        let width = usize::try_from(width).unwrap_or_default();
        format!("{v:>width$}")
    });
    let mut hb = handlebars::Handlebars::new();
    hb.register_escape_fn(handlebars::no_escape);
    hb.register_helper("lpad", Box::new(left_pad));
    hb.register_template_string("describe", TEXT_TEMPLATE)
        .context("parsing template")?;

    hb.render("describe", info).context("rendering text")
}

// keys are right-aligned so the values line up
const TEXT_TEMPLATE: &str = r"{{ #each description }}{{ lpad 21 @key }}: {{ this }}
{{ /each }}";

#[cfg(test)]
mod tests {
    use super::*;

    fn output(variant: Variant, code: &str, format: Format) -> String {
        let mut out = Vec::new();
        describe(variant, code, &format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text() {
        let text = output(Variant::Tc10, "2019bcvsj2", Format::Text);

        assert_eq!(text.lines().count(), 5, "{text}");
        assert!(text.contains("                 code: 2019BCVSJ2\n"), "{text}");
        assert!(text.contains("              summary: 2019-01-02T16:47:42Z/16:47:43Z\n"));
        assert!(text.contains("encoded-window-of-10s: 0014686\n"));
        assert!(text.contains("       encoded-second: 2\n"));
    }

    #[test]
    fn json() {
        let json = output(Variant::Year8, "2024MSZH", Format::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["variant"], "year8");
        assert_eq!(value["timecode"]["hour"], 3842);
        assert_eq!(value["timecode"]["window"], 5);
        assert_eq!(value["description"]["summary"], "2024-06-09T02:15Z/02:18Z");
        assert_eq!(value["description"]["encoded-window-of-3m"], "05");
    }

    #[test]
    fn malformed_code() {
        let err = describe(Variant::Tc8, "2024", &Format::Text, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("2024"), "{err}");
    }
}
