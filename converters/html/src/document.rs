use std::io::Write;

use crate::{
    Error, Processor, RenderOptions,
    constants::{DEFAULT_TITLE, DOCTYPE, XHTML_NAMESPACE},
    escape::{escape_attribute, escape_text},
};

/// Write everything up to and including the opening `<body>` tag.
pub(crate) fn render_document_start<W: Write + ?Sized>(
    w: &mut W,
    processor: &Processor,
    options: &RenderOptions,
) -> Result<(), Error> {
    writeln!(w, "{DOCTYPE}")?;
    writeln!(w, r#"<html xmlns="{XHTML_NAMESPACE}">"#)?;
    writeln!(w, "<head>")?;
    writeln!(w, r#"<meta charset="UTF-8"/>"#)?;
    render_generator(w, processor)?;
    let title = options.title.as_deref().unwrap_or(DEFAULT_TITLE);
    writeln!(w, "<title>{}</title>", escape_text(title))?;
    writeln!(w, "</head>")?;
    writeln!(w, "<body>")?;
    Ok(())
}

pub(crate) fn render_document_end<W: Write + ?Sized>(w: &mut W) -> Result<(), Error> {
    writeln!(w, "</body>")?;
    writeln!(w, "</html>")?;
    Ok(())
}

fn render_generator<W: Write + ?Sized>(w: &mut W, processor: &Processor) -> Result<(), Error> {
    let generator = processor.options.generator_metadata();
    if generator.name().is_empty() {
        return Ok(());
    }
    writeln!(
        w,
        r#"<meta name="generator" content="{}"/>"#,
        escape_attribute(&generator.to_string())
    )?;
    Ok(())
}
