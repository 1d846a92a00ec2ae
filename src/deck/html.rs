// Rendering of the reveal.js document.

use std::fmt::Write;

use crate::deck::*;

/// Escapes free text for interpolation into the document. Everything read
/// from a spreadsheet goes through here, names and comments included.
pub fn escape_html(text: &str) -> String {
    let mut res = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => res.push_str("&amp;"),
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            '"' => res.push_str("&quot;"),
            '\'' => res.push_str("&#39;"),
            _ => res.push(c),
        }
    }
    res
}

fn info_row(output: &mut String, label: &str, value: &str) {
    let _ = writeln!(output, "            <tr>");
    let _ = writeln!(output, "              <td>{}</td>", escape_html(label));
    let _ = writeln!(output, "              <td>{}</td>", escape_html(value));
    let _ = writeln!(output, "            </tr>");
}

/// Renders one rushee as a reveal.js section.
///
/// The profile table always carries Primary, Bucket, Closers and Status.
/// Secondary, Year and Cross-Rush only show up when a reviewer filled them,
/// which keeps the table compact for the common case.
pub fn render_slide(record: &RusheeRecord, photo_url: &str) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "<section>");
    let _ = writeln!(output, "  <div id='slide'>");
    let _ = writeln!(output, "    <div id='name'>");
    let _ = writeln!(output, "      <h1>{}</h1>", escape_html(&record.name));
    let _ = writeln!(output, "    </div>");
    let _ = writeln!(output, "    <div class='flex-container'>");
    let _ = writeln!(output, "      <div id='profile'>");
    let _ = writeln!(output, "        <div id='pic'>");
    let _ = writeln!(output, "          <img src=\"{}\" />", escape_html(photo_url));
    let _ = writeln!(output, "        </div>");
    let _ = writeln!(output, "        <div id='info'>");
    let _ = writeln!(output, "          <table>");
    info_row(&mut output, "Primary", &record.primary);
    if !record.secondary.is_empty() {
        info_row(&mut output, "Secondary", &record.secondary);
    }
    info_row(&mut output, "Bucket", record.bucket.label());
    info_row(&mut output, "Closers", &record.closers);
    info_row(&mut output, "Status", &record.status);
    if !record.year.is_empty() {
        info_row(&mut output, "Year", &record.year);
    }
    if !record.cross_rush.is_empty() {
        info_row(&mut output, "Cross-Rush", &record.cross_rush);
    }
    let _ = writeln!(output, "          </table>");
    let _ = writeln!(output, "        </div>");
    let _ = writeln!(output, "      </div>");
    let _ = writeln!(output, "      <div id='about'>");
    let _ = writeln!(output, "        <div id='about1'>");
    let _ = writeln!(output, "          <ul>");
    for comment in record.comments.iter() {
        let _ = writeln!(output, "            <li>{}</li>", escape_html(comment));
    }
    let _ = writeln!(output, "          </ul>");
    let _ = writeln!(output, "        </div>");
    let _ = writeln!(output, "        <div id='about2'>");
    let _ = writeln!(output, "          <ul>");
    let _ = writeln!(output, "          </ul>");
    let _ = writeln!(output, "        </div>");
    let _ = writeln!(output, "      </div>");
    let _ = writeln!(output, "    </div>");
    let _ = writeln!(output, "  </div>");
    let _ = writeln!(output, "</section>");
    output
}

/// Assembles the full document around the slides: stylesheet links in the
/// head, the reveal containers, and the initialization script.
pub fn render_document(settings: &OutputSettings, slides: &[String]) -> DeckResult<String> {
    let transition = settings.transition()?;
    let theme = settings.theme()?;

    let mut output = String::new();
    let _ = writeln!(output, "<html>");
    let _ = writeln!(output, "  <head>");
    let _ = writeln!(output, "    <meta charset=\"utf-8\">");
    let _ = writeln!(
        output,
        "    <title>{}</title>",
        escape_html(&settings.deck_title)
    );
    let _ = writeln!(
        output,
        "    <link rel=\"stylesheet\" href=\"assets/css/reveal.css\">"
    );
    let _ = writeln!(
        output,
        "    <link rel=\"stylesheet\" href=\"assets/css/theme/{}.css\">",
        escape_html(&theme)
    );
    let _ = writeln!(
        output,
        "    <link rel=\"stylesheet\" href=\"assets/css/custom.css\">"
    );
    let _ = writeln!(output, "  </head>");
    let _ = writeln!(output, "  <body>");
    let _ = writeln!(output, "    <div class=\"reveal\">");
    let _ = writeln!(output, "      <div class=\"slides\">");
    for slide in slides.iter() {
        output.push_str(slide);
    }
    let _ = writeln!(output, "      </div>");
    let _ = writeln!(output, "    </div>");
    let _ = writeln!(output, "    <script src=\"assets/js/reveal.js\"></script>");
    let _ = writeln!(output, "    <script>");
    let _ = writeln!(output, "      Reveal.initialize({{");
    let _ = writeln!(output, "        controls: true,");
    let _ = writeln!(output, "        progress: true,");
    let _ = writeln!(output, "        history: true,");
    let _ = writeln!(output, "        center: true,");
    let _ = writeln!(output, "        slideNumber: true,");
    let _ = writeln!(
        output,
        "        transition: '{}' // none/fade/slide/convex/concave/zoom",
        transition
    );
    let _ = writeln!(output, "      }});");
    let _ = writeln!(output, "    </script>");
    let _ = writeln!(output, "  </body>");
    let _ = writeln!(output, "</html>");
    Ok(output)
}

pub fn write_deck(path: &Path, document: &str) -> DeckResult<()> {
    fs::write(path, document).context(WritingOutputSnafu {
        path: path.display().to_string(),
    })?;
    Ok(())
}
