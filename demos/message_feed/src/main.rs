//! Drives a recycler list over a synthetic chat history without a UI.
//!
//! Run with `RUST_LOG=debug` to watch filling, eviction and navigation; pass a
//! JSON file with `ListConfig` fields to override the defaults.

use anyhow::Context;
use recycler_list::prelude::*;
use web_time::{Duration, Instant};

/// Stand-in for a text bubble; its height is only known after "layout".
struct Bubble {
    text: String,
    measured: bool,
}

impl Bubble {
    fn lines(&self) -> usize {
        self.text.len().div_ceil(32).max(1)
    }

    fn measure(&self) -> f32 {
        12.0 + 18.0 * self.lines() as f32
    }
}

#[derive(Default)]
struct BubbleFactory {
    created: usize,
    released: usize,
}

impl ItemFactory for BubbleFactory {
    type Visual = Bubble;

    fn materialize(&mut self, record: &Record) -> Materialized<Bubble> {
        self.created += 1;
        let n = record.id.0;
        let bubble = Bubble {
            text: "lorem ipsum ".repeat(1 + (n as usize * 7) % 9),
            measured: record.height.is_some(),
        };
        match record.height {
            Some(h) => Materialized::new(bubble, h),
            None => Materialized::unmeasured(bubble),
        }
    }

    fn release(&mut self, _id: ItemId, _visual: Bubble) {
        self.released += 1;
    }

    fn set_visible(&mut self, visual: &mut Bubble, visible: bool) {
        log::trace!("bubble '{}…' visible={visible}", &visual.text[..8]);
    }
}

type Feed = RecyclerList<OrderedSource, BubbleFactory, FixedViewport>;

/// Plays the host's part: measure new bubbles and report their heights until
/// the stack settles.
fn layout_pass(feed: &mut Feed) {
    loop {
        let pending: Vec<(ItemId, f32)> = feed
            .items()
            .filter(|h| !h.visual().measured)
            .map(|h| (h.id(), h.visual().measure()))
            .collect();
        if pending.is_empty() {
            break;
        }
        for (id, height) in pending {
            if let Some(v) = feed.visual_mut(id) {
                v.measured = true;
            }
            feed.set_item_height(id, height);
        }
    }
}

fn report(feed: &mut Feed, what: &str) {
    let changes = feed.take_changes();
    let view = feed.view_range();
    let visible: Vec<String> = feed
        .items()
        .filter(|h| h.is_visible())
        .map(|h| h.id().to_string())
        .collect();
    log::info!(
        "{what}: view [{:.1}, {:.1}], {} live, visible {}, changes {changes:?}",
        view.top,
        view.bottom,
        feed.len(),
        visible.join(" ")
    );
}

fn load_config() -> anyhow::Result<ListConfig> {
    let Some(path) = std::env::args().nth(1) else {
        // bubbles arrive unmeasured; a small budget keeps the first fill short
        return Ok(ListConfig::default().with_max_scroll_materializations(32));
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config: ListConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = load_config()?;
    let clock = ManualClock::new(Instant::now());
    let mut feed = RecyclerList::new(
        OrderedSource::synthetic(400),
        BubbleFactory::default(),
        FixedViewport::new(360.0, 640.0),
        config,
    )?
    .with_clock(clock.clone());
    log::info!("{} bubbles before the first layout pass", feed.len());
    layout_pass(&mut feed);
    report(&mut feed, "opened");

    for _ in 0..6 {
        feed.process_scroll_delta(-180.0);
        layout_pass(&mut feed);
    }
    report(&mut feed, "scrolled back");

    let frame = feed.config().nav_interval();
    let mut status = feed.scroll_to_id(120);
    while !status.is_finished() {
        clock.advance(frame);
        status = feed.tick();
        layout_pass(&mut feed);
    }
    report(&mut feed, &format!("{status:?}"));

    feed.add_record(Record::new(400).with_height(90.0));
    feed.remove_record(124)?;
    feed.modify_record(126, &RecordPatch::default().valid(false))?;
    layout_pass(&mut feed);
    report(&mut feed, "edited");

    let mut status = feed.scroll_to_id(400);
    let started = Instant::now();
    while !status.is_finished() && started.elapsed() < Duration::from_secs(5) {
        clock.advance(frame);
        status = feed.tick();
        layout_pass(&mut feed);
    }
    report(&mut feed, &format!("{status:?}"));

    let factory = feed.factory();
    log::info!(
        "bubbles created {}, released {}, live {}",
        factory.created,
        factory.released,
        feed.len()
    );
    println!("{}", feed.describe());
    Ok(())
}
