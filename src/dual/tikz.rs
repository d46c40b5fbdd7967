use std::io::Write;

use crate::dual::rectangles::RectangularDual;
use crate::graph::indices::VertexI;

pub struct TikzOptions<'a> {
    pub print_document: bool,
    pub print_environment: bool,
    pub print_styles: bool,
    //
    pub print_labels: bool,
    //
    pub title: Option<&'a str>,
    pub scale: f32,
}

impl<'a> Default for TikzOptions<'a> {
    fn default() -> Self {
        TikzOptions {
            print_document: true,
            print_environment: true,
            print_styles: true,
            print_labels: true,
            title: None,
            scale: 1.0,
        }
    }
}

fn style_of(v: VertexI) -> &'static str {
    if v.0 < 4 {
        "rd_outer"
    } else {
        "rd_inner"
    }
}

impl RectangularDual {
    pub fn write_tikz(&self, writer: &mut dyn Write, options: &TikzOptions) -> std::io::Result<()> {
        let tikz_str = self.generate_tikz(options);
        writer.write_all(tikz_str.as_bytes())
    }

    /// Draws every rectangle as a filled box. The grid is mirrored vertically since
    /// TikZ has y growing upwards.
    pub fn generate_tikz(&self, options: &TikzOptions) -> String {
        let mut mid = String::new();
        let indent_counter = if options.print_document { 1 } else { 0 } + if options.print_environment { 1 } else { 0 };
        let ind = "\t".repeat(indent_counter);

        if options.print_styles {
            mid.push_str(&format!("{}\\tikzset {{\n", ind));
            mid.push_str(&format!("{}\trd_outer/.style = {{draw=black, fill=black!10}},\n", ind));
            mid.push_str(&format!("{}\trd_inner/.style = {{draw=black, fill=blue!5}},\n", ind));
            mid.push_str(&format!("{}\trd_label/.style = {{font=\\scriptsize}},\n", ind));
            mid.push_str(&format!("{}}}\n", ind));
        }

        for (i, r) in self.rectangles.iter().enumerate() {
            let v = VertexI(i);
            let (top, bottom) = (self.ymax.saturating_sub(r.y1), self.ymax.saturating_sub(r.y2));
            mid.push_str(&format!(
                "{}\\draw[{}] ({},{}) rectangle ({},{});\n",
                ind,
                style_of(v),
                r.x1,
                bottom,
                r.x2,
                top
            ));
            if options.print_labels {
                let cx = (r.x1 + r.x2) as f32 / 2.0;
                let cy = (top + bottom) as f32 / 2.0;
                mid.push_str(&format!(
                    "{}\\node[rd_label] at ({},{}) {{${}$}};\n",
                    ind,
                    cx,
                    cy,
                    v.0
                ));
            }
        }

        let mut result = String::new();
        if options.print_document {
            result.push_str("\\documentclass{standalone}\n\\usepackage{tikz}\n\\begin{document}\n");
        }
        if let Some(title) = options.title {
            result.push_str(&format!("% {}\n", title));
        }
        if options.print_environment {
            let ind = if options.print_document { "\t" } else { "" };
            result.push_str(&format!("{}\\begin{{tikzpicture}}[scale={}]\n", ind, options.scale));
        }
        result.push_str(&mid);
        if options.print_environment {
            let ind = if options.print_document { "\t" } else { "" };
            result.push_str(&format!("{}\\end{{tikzpicture}}\n", ind));
        }
        if options.print_document {
            result.push_str("\\end{document}\n");
        }
        result
    }
}
