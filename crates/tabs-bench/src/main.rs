use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use term_tabs::components::LabelComponent;
use term_tabs::tabs::{FixedDensity, TabSizing};
use term_tabs::ui::UiFrame;
use term_tabs::{TabHost, TabPage, TabStrip};

#[derive(Parser, Debug)]
#[command(
    name = "tabs-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Headless benchmark: tab churn, hit-testing and rendering into an off-screen buffer"
)]
struct BenchCli {
    /// Tabs kept open while the benchmark runs.
    #[arg(short = 't', long = "tabs", value_name = "COUNT", default_value_t = 64)]
    tabs: usize,

    /// Number of frames to simulate.
    #[arg(short = 'n', long = "frames", value_name = "FRAMES", default_value_t = 5_000)]
    frames: u64,

    /// Width of the off-screen buffer in cells.
    #[arg(long, value_name = "CELLS", default_value_t = 160)]
    width: u16,

    /// Height of the off-screen buffer in cells.
    #[arg(long, value_name = "CELLS", default_value_t = 48)]
    height: u16,

    /// Display density factor applied to tab metrics.
    #[arg(long, value_name = "FACTOR", default_value_t = 1.0)]
    scale: f32,

    /// Caption sizing: "fit" or "fixed:<cells>".
    #[arg(long, value_name = "MODE", default_value = "fit")]
    sizing: String,
}

struct BenchConfig {
    tabs: usize,
    frames: u64,
    area: Rect,
    scale: f32,
    sizing: TabSizing,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(1..=4_096).contains(&cli.tabs) {
            return Err("tabs must be between 1 and 4096".to_string());
        }
        if cli.frames == 0 {
            return Err("frames must be positive".to_string());
        }
        if cli.width < 8 || cli.height < 4 {
            return Err("buffer must be at least 8x4 cells".to_string());
        }
        let sizing = cli
            .sizing
            .parse::<TabSizing>()
            .map_err(|err| err.to_string())?;
        Ok(Self {
            tabs: cli.tabs,
            frames: cli.frames,
            area: Rect::new(0, 0, cli.width, cli.height),
            scale: cli.scale,
            sizing,
        })
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;
    let stats = run_benchmark(&config).map_err(io::Error::other)?;
    println!("{}", stats.final_report(&config));
    Ok(())
}

fn labelled_page(n: u64) -> TabPage {
    let text = format!("tab {n}");
    let body = format!("body of {text}");
    TabPage::new(text).with_component(LabelComponent::new(body))
}

fn click(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn run_benchmark(config: &BenchConfig) -> Result<BenchStats, term_tabs::TabError> {
    let strip = TabStrip::new()
        .with_density(&FixedDensity(config.scale))
        .with_sizing(config.sizing);
    let mut host = TabHost::with_strip(strip);
    let mut created: u64 = 0;
    for _ in 0..config.tabs {
        created += 1;
        host.add_tab_page(labelled_page(created));
    }
    host.resize(config.area);

    let mut buffer = Buffer::empty(config.area);
    let mut stats = BenchStats::new();
    for frame_no in 0..config.frames {
        let frame_start = Instant::now();

        // Rotate one tab: drop the oldest, add a fresh one at the front.
        let oldest = host.tab_count() - 1;
        host.remove_tab_page_at(oldest)?;
        created += 1;
        host.add_tab_page(labelled_page(created));

        // Click a handle body somewhere along the visible strip.
        let visible = host.strip().placements().iter().filter(|p| p.visible.width > 0).count();
        if visible > 0 {
            let index = (frame_no as usize) % visible;
            if let Some(rect) = host.strip().tab_rect(index) {
                host.handle_event(&click(rect.x, rect.y))?;
                stats.clicks += 1;
            }
        }

        buffer.reset();
        {
            let mut frame = UiFrame::from_parts(config.area, &mut buffer);
            host.render(&mut frame, config.area);
        }
        stats.record_frame(frame_start.elapsed());
    }
    host.close_all()?;
    stats.mark_completed();
    Ok(stats)
}

struct BenchStats {
    start: Instant,
    completed_at: Option<Instant>,
    frame_count: u64,
    clicks: u64,
    total_frame_time: Duration,
    fastest_frame: Duration,
    slowest_frame: Duration,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            completed_at: None,
            frame_count: 0,
            clicks: 0,
            total_frame_time: Duration::ZERO,
            fastest_frame: Duration::MAX,
            slowest_frame: Duration::ZERO,
        }
    }

    fn elapsed(&self) -> Duration {
        match self.completed_at {
            Some(done) => done.duration_since(self.start),
            None => self.start.elapsed(),
        }
    }

    fn mark_completed(&mut self) {
        self.completed_at = Some(Instant::now());
    }

    fn record_frame(&mut self, frame_time: Duration) {
        self.frame_count = self.frame_count.saturating_add(1);
        self.total_frame_time += frame_time;
        self.fastest_frame = self.fastest_frame.min(frame_time);
        self.slowest_frame = self.slowest_frame.max(frame_time);
    }

    fn average_frame_us(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        self.total_frame_time.as_secs_f64() / self.frame_count as f64 * 1_000_000.0
    }

    fn fastest_frame_us(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        self.fastest_frame.as_secs_f64() * 1_000_000.0
    }

    fn slowest_frame_us(&self) -> f64 {
        self.slowest_frame.as_secs_f64() * 1_000_000.0
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let elapsed = self.elapsed().as_secs_f64();
        let fps = if elapsed > 0.0 {
            self.frame_count as f64 / elapsed
        } else {
            0.0
        };
        indoc::formatdoc!(
            r#"
            Tab bench completed.
            Tabs: {tabs} | Buffer: {width}x{height} | Scale: {scale} | Sizing: {sizing}
            Frames: {frames} in {elapsed:.2}s (~{fps:.0}/s) | Clicks: {clicks}
            Frame: avg {avg:.1} us | best {best:.1} us | worst {worst:.1} us
            "#,
            tabs = config.tabs,
            width = config.area.width,
            height = config.area.height,
            scale = config.scale,
            sizing = config.sizing,
            frames = self.frame_count,
            elapsed = elapsed,
            fps = fps,
            clicks = self.clicks,
            avg = self.average_frame_us(),
            best = self.fastest_frame_us(),
            worst = self.slowest_frame_us(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> BenchCli {
        BenchCli::parse_from(std::iter::once("tabs-bench").chain(args.iter().copied()))
    }

    #[test]
    fn config_rejects_unknown_sizing() {
        let args = cli(&["--sizing", "stretch"]);
        assert!(BenchConfig::try_from(&args).is_err());
    }

    #[test]
    fn short_run_keeps_tab_count() {
        let args = cli(&["--tabs", "5", "--frames", "20", "--width", "40", "--height", "10"]);
        let config = BenchConfig::try_from(&args).unwrap();
        let stats = run_benchmark(&config).unwrap();
        assert_eq!(stats.frame_count, 20);
        assert!(stats.clicks > 0);
    }
}
