use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::event::Event;
use indoc::indoc;
use ratatui::layout::Rect;
use ratatui::style::Style;

use term_tabs::components::{LabelComponent, ListComponent};
use term_tabs::constants::DEFAULT_STRIP_HEIGHT;
use term_tabs::drivers::OutputDriver;
use term_tabs::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use term_tabs::event_loop::{ControlFlow, EventLoop};
use term_tabs::keybindings::{Action, KeyBindings};
use term_tabs::tabs::{BorderStyle, FixedDensity, TabSizing};
use term_tabs::ui::UiFrame;
use term_tabs::{TabError, TabHost, TabPage, TabStrip, theme, tracing_sub};

const NOTES: &str = indoc! {"
    Each tab owns the widget shown below the strip.

    Click a tab to select it, click its × to close it.
    Closing the selected tab selects its neighbour.

    Up/Down scroll this text; the Files tab takes
    arrow keys, Home/End and mouse clicks.
"};

#[derive(Parser, Debug)]
#[command(
    name = "term-tabs",
    version = env!("CARGO_PKG_VERSION"),
    about = "Closable tab container demo"
)]
struct Cli {
    /// Display density factor applied to every tab metric.
    #[arg(long, value_name = "FACTOR", default_value_t = 1.0)]
    scale: f32,

    /// Caption sizing: "fit" or "fixed:<cells>".
    #[arg(long, value_name = "MODE", default_value = "fit", value_parser = parse_sizing)]
    sizing: TabSizing,

    /// Frame drawn around the content region.
    #[arg(long, value_enum, default_value_t = BorderStyle::Single)]
    border: BorderStyle,

    /// Rows reserved for the tab strip.
    #[arg(long, value_name = "ROWS", default_value_t = DEFAULT_STRIP_HEIGHT)]
    strip_height: u16,

    /// Append debug logs to this file. Logs are discarded otherwise.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn parse_sizing(value: &str) -> Result<TabSizing, String> {
    value.parse().map_err(|err: TabError| err.to_string())
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    tracing_sub::init_default(cli.log_file.as_deref())?;
    tracing::info!(?cli, "starting tab demo");

    let mut app = DemoApp::new(&cli);
    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let mut event_loop = EventLoop::new(ConsoleInputDriver::new(), Duration::from_millis(16));

    let result = event_loop.run(|_, event| match event {
        None => {
            if app.take_redraw() {
                output.draw(|mut frame| app.render(&mut frame))?;
            }
            Ok(ControlFlow::Continue)
        }
        Some(event) => Ok(app.handle_event(&event)),
    });

    output.exit()?;
    app.host.close_all().map_err(io::Error::other)?;
    result
}

struct DemoApp {
    host: TabHost,
    bindings: KeyBindings,
    created: usize,
    status: Option<String>,
    dirty: bool,
}

impl DemoApp {
    fn new(cli: &Cli) -> Self {
        let strip = TabStrip::new()
            .with_density(&FixedDensity(cli.scale))
            .with_sizing(cli.sizing)
            .with_height(cli.strip_height);
        let mut host = TabHost::with_strip(strip);
        host.set_border_style(cli.border);
        host.on_tab_closed(|page| tracing::info!(page = %page.id(), text = page.text(), "tab closed"));

        host.add_tab_page(TabPage::new("Empty"));
        host.add_tab_page(TabPage::new("Files").with_component(
            ListComponent::new("Files").with_items([
                "Cargo.toml",
                "src/lib.rs",
                "src/tabs/host.rs",
                "src/tabs/strip.rs",
                "src/tabs/handle.rs",
                "src/tabs/page.rs",
            ]),
        ));
        host.add_tab_page(
            TabPage::new("Notes")
                .with_background(theme::control_face())
                .with_component(LabelComponent::new(NOTES)),
        );
        host.set_selected_index(0);

        Self {
            host,
            bindings: KeyBindings::default(),
            created: 0,
            status: None,
            dirty: true,
        }
    }

    fn handle_event(&mut self, event: &Event) -> ControlFlow {
        if let Event::Key(key) = event
            && let Some(action) = self.bindings.action_for_key(key)
        {
            if action == Action::Quit {
                return ControlFlow::Quit;
            }
            let result = self.apply(action);
            self.report(result);
            self.dirty = true;
            return ControlFlow::Continue;
        }

        if let Event::Resize(..) = event {
            self.dirty = true;
            return ControlFlow::Continue;
        }

        let before = self.host.selected_index();
        let count = self.host.tab_count();
        let result = self.host.handle_event(event);
        if let Some(index) = before
            && self.host.selected_index().is_none()
            && self.host.tab_count() < count
        {
            self.select_neighbour(index);
        }
        self.report(result.map(|_| ()));
        ControlFlow::Continue
    }

    fn apply(&mut self, action: Action) -> Result<(), TabError> {
        match action {
            Action::Quit => {}
            Action::NewTab => {
                self.created += 1;
                let text = format!("Tab {}", self.created);
                let body = format!("{text} was opened from the keyboard.");
                let id = self
                    .host
                    .add_tab_page(TabPage::new(text).with_component(LabelComponent::new(body)));
                self.host.set_selected_tab(Some(id));
            }
            Action::CloseTab => {
                if let Some(index) = self.host.selected_index() {
                    let removed = self.host.remove_tab_page_at(index);
                    self.select_neighbour(index);
                    removed?;
                }
            }
            Action::NextTab => self.step_selection(1),
            Action::PrevTab => self.step_selection(-1),
            Action::CycleBorder => {
                let next = self.host.border_style().cycle();
                self.host.set_border_style(next);
            }
        }
        Ok(())
    }

    /// After closing the tab at `index`, select whichever tab slid into its
    /// place, or the new last tab.
    fn select_neighbour(&mut self, index: usize) {
        let count = self.host.tab_count();
        if count > 0 && self.host.selected_tab_id().is_none() {
            self.host.set_selected_index(index.min(count - 1));
        }
    }

    fn step_selection(&mut self, delta: isize) {
        let count = self.host.tab_count();
        if count == 0 {
            return;
        }
        let next = match self.host.selected_index() {
            Some(current) => (current as isize + delta).rem_euclid(count as isize) as usize,
            None => 0,
        };
        self.host.set_selected_index(next);
    }

    fn report(&mut self, result: Result<(), TabError>) {
        if let Err(err) = result {
            tracing::error!(error = %err, "tab operation failed");
            self.status = Some(err.to_string());
            self.dirty = true;
        }
    }

    fn take_redraw(&mut self) -> bool {
        let host = self.host.take_redraw();
        std::mem::take(&mut self.dirty) | host
    }

    fn status_line(&self) -> String {
        let hints = self.bindings.hint_line(&[
            Action::NewTab,
            Action::CloseTab,
            Action::NextTab,
            Action::CycleBorder,
            Action::Quit,
        ]);
        match &self.status {
            Some(message) => format!("{message} | {hints}"),
            None => format!("{} tabs | {hints}", self.host.tab_count()),
        }
    }

    fn render(&mut self, frame: &mut UiFrame<'_>) {
        let area = frame.area();
        let body = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };
        let status = Rect {
            y: area.y.saturating_add(body.height),
            height: area.height - body.height,
            ..area
        };
        self.host.render(frame, body);
        frame.fill(status, Style::default().bg(theme::strip_bg()));
        frame.set_string(
            status,
            status.x,
            status.y,
            &self.status_line(),
            Style::default().fg(theme::tab_fg()).bg(theme::strip_bg()),
        );
    }
}
