use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use crossterm::style::Stylize;
use markup_converters_core::visitor::Visitor;
use markup_parser::{Element, Node};

use crate::error;

/// Inspect the node tree of a plain-text markup document
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Input file
    pub file: PathBuf,

    /// Print the tree as JSON instead of a drawing
    #[arg(long)]
    pub json: bool,

    /// Maximum depth to display (0 = unlimited)
    #[arg(long, default_value = "0")]
    pub max_depth: usize,
}

struct TreeVisitor<W: Write> {
    writer: W,
    depth: usize,
    is_last_stack: Vec<bool>,
    max_depth: usize,
}

impl<W: Write> TreeVisitor<W> {
    fn new(writer: W, max_depth: usize) -> Self {
        Self {
            writer,
            depth: 0,
            is_last_stack: Vec::new(),
            max_depth,
        }
    }

    fn should_show(&self) -> bool {
        self.max_depth == 0 || self.depth <= self.max_depth
    }

    fn print_tree_line(&mut self, name: &str, detail: Option<&str>) -> io::Result<()> {
        if !self.should_show() {
            return Ok(());
        }

        // Print tree structure: ├─, └─, │
        for i in 0..self.depth {
            let is_last = self.is_last_stack.get(i) == Some(&true);
            let prefix = match (i + 1 == self.depth, is_last) {
                (true, true) => "└─ ",
                (true, false) => "├─ ",
                (false, true) => "   ",
                (false, false) => "│  ",
            };
            write!(self.writer, "{prefix}")?;
        }

        write!(self.writer, "{}", name.cyan().bold())?;

        if let Some(d) = detail {
            write!(self.writer, ": {}", d.yellow())?;
        }

        writeln!(self.writer)?;

        Ok(())
    }

    fn with_child<F>(&mut self, is_last: bool, f: F) -> io::Result<()>
    where
        F: FnOnce(&mut Self) -> io::Result<()>,
    {
        self.is_last_stack.push(is_last);
        self.depth += 1;
        let result = f(self);
        self.is_last_stack.pop();
        self.depth = self.depth.saturating_sub(1);
        result
    }
}

/// Truncate text for display
fn truncate(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}... ({count} chars)")
    }
}

fn attributes_detail(element: &Element) -> Option<String> {
    if element.attributes.is_empty() {
        return None;
    }
    let rendered: Vec<String> = element
        .attributes
        .iter()
        .map(|(name, value)| format!("{name}={value:?}"))
        .collect();
    Some(rendered.join(" "))
}

impl<W: Write> Visitor for TreeVisitor<W> {
    type Error = io::Error;

    fn visit_document_start(&mut self, _root: &Node) -> Result<(), Self::Error> {
        writeln!(self.writer, "{}", "Document".blue().bold())?;
        Ok(())
    }

    fn visit_children(&mut self, nodes: &[Node]) -> Result<(), Self::Error> {
        for (index, node) in nodes.iter().enumerate() {
            let is_last = index + 1 == nodes.len();
            self.with_child(is_last, |visitor| visitor.visit_node(node))?;
        }
        Ok(())
    }

    fn visit_element_start(&mut self, element: &Element) -> Result<(), Self::Error> {
        let detail = attributes_detail(element);
        self.print_tree_line(&element.tag, detail.as_deref())
    }

    fn visit_element_end(&mut self, _element: &Element) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_text(&mut self, text: &str) -> Result<(), Self::Error> {
        let detail = format!("{:?}", truncate(text, 40));
        self.print_tree_line("text", Some(&detail))
    }
}

pub fn run(args: &Args) -> miette::Result<()> {
    let content = fs::read_to_string(&args.file).map_err(|e| error::display(&e, None))?;

    let root = markup_parser::parse(&content)
        .map_err(|e| error::display(&e, Some((args.file.as_path(), content.as_str()))))?;

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut writer, &root).map_err(|e| error::display(&e, None))?;
        writeln!(writer).map_err(|e| error::display(&e, None))?;
        return Ok(());
    }

    TreeVisitor::new(writer, args.max_depth)
        .visit_document(&root)
        .map_err(|e| error::display(&e, None))
}
