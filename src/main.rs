use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyModifiers};
use serde_json::json;

use dnd_tree::config::GestureArgs;
use dnd_tree::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use dnd_tree::drivers::pointer::PointerTranslator;
use dnd_tree::event_loop::{ControlFlow, EventLoop};
use dnd_tree::gesture::{GestureConfig, GestureController};
use dnd_tree::tree::{NodeDescription, NodeKey, NodeTree, Properties, load_list};
use dnd_tree::view::{TreeView, property_label};

#[derive(Parser, Debug)]
#[command(
    name = "dnd-tree",
    version = env!("CARGO_PKG_VERSION"),
    about = "Reorder a nested list by dragging rows with the mouse"
)]
struct Cli {
    /// JSON array of node descriptions to start from.
    #[arg(short = 't', long = "tree", value_name = "FILE")]
    tree: Option<PathBuf>,

    /// Append debug logs to this file.
    #[arg(long = "log", value_name = "FILE")]
    log: Option<PathBuf>,

    #[command(flatten)]
    gesture: GestureArgs,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = GestureConfig::try_from(&cli.gesture)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;
    dnd_tree::tracing_sub::init_default(cli.log.as_deref())?;

    let list = match &cli.tree {
        Some(path) => load_list::<Properties>(path)?,
        None => sample_list(),
    };
    let mut app = App::new(list, config);

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let mut event_loop = EventLoop::new(ConsoleInputDriver::new(), Duration::from_millis(16));
    let result = event_loop.run(|event| match event {
        None => {
            output.draw(|frame| app.draw(frame))?;
            Ok(ControlFlow::Continue)
        }
        Some(event) => Ok(app.handle_event(&event)),
    });
    output.exit()?;
    result?;

    let list = app.tree.to_list(app.root);
    println!(
        "{}",
        serde_json::to_string_pretty(&list).map_err(io::Error::other)?
    );
    Ok(())
}

struct App {
    tree: NodeTree<Properties>,
    root: NodeKey,
    controller: GestureController<Properties>,
    view: TreeView<Properties>,
    translator: PointerTranslator,
}

impl App {
    fn new(list: Vec<NodeDescription<Properties>>, config: GestureConfig) -> Self {
        let mut tree = NodeTree::new();
        let root = tree.from_list(list);
        let mut controller = GestureController::new(config);
        let view = TreeView::new("dnd-tree", property_label);
        view.attach(&mut controller);
        Self {
            tree,
            root,
            controller,
            view,
            translator: PointerTranslator::new(),
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        self.view.render(frame, area, &self.tree, self.root);
    }

    fn handle_event(&mut self, event: &Event) -> ControlFlow {
        match event {
            Event::Key(key)
                if key.code == KeyCode::Char('q')
                    || key.code == KeyCode::Esc
                    || (key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)) =>
            {
                ControlFlow::Quit
            }
            Event::Mouse(mouse) => {
                if let Some(pointer) = self.translator.translate(mouse, Instant::now())
                    && let Some(outcome) =
                        self.controller
                            .handle(&mut self.tree, self.view.host(), &pointer)
                {
                    tracing::info!(?outcome, "drop finished");
                }
                ControlFlow::Continue
            }
            _ => ControlFlow::Continue,
        }
    }
}

fn item(label: &str) -> NodeDescription<Properties> {
    let mut properties = Properties::new();
    properties.insert("label".to_string(), json!(label));
    NodeDescription::new(properties)
}

fn sample_list() -> Vec<NodeDescription<Properties>> {
    vec![
        item("Header"),
        item("Body")
            .droppable(true)
            .with_child(item("Paragraph"))
            .with_child(item("Image")),
        item("Sidebar").droppable(true),
        item("Footer"),
    ]
}
