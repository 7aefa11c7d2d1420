// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive the docs shell headlessly: keyboard navigation in the sidebar, a
//! `popstate`, a command palette jump, and a sidebar resize.
//!
//! Run:
//! - `cargo run -p wayfinder_demos --example docs_shell`
//! - `RUST_LOG=wayfinder_widgets=debug,wayfinder_router=debug cargo run -p wayfinder_demos --example docs_shell`

use std::error::Error;

use kurbo::Point;
use wayfinder_event_state::overlay::OpenTrigger;
use wayfinder_focus::keys::{Key, KeyInput, Modifiers, Orientation};
use wayfinder_router::events::{Event, Outcome};
use wayfinder_router::router::RouteChange;
use wayfinder_widgets::docs::DocsShell;
use wayfinder_widgets::host::{Attr, Host, MemoryHost};
use wayfinder_widgets::palette::{Command, CommandPalette};
use wayfinder_widgets::panels::{PanelResize, ResizablePanels};
use wayfinder_widgets::widget::Widget;

const SITE: &str = include_str!("../content/site.json");

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("wayfinder_widgets=debug,wayfinder_router=debug,docs_shell=info")
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

fn build_host() -> MemoryHost {
    let mut host = MemoryHost::with_nodes(["sidebar", "separator", "content", "palette"]);
    for row in [
        "home",
        "guides",
        "install",
        "theming",
        "components",
        "button",
        "tree-view",
        "dialog",
        "changelog",
    ] {
        host.connect_in("sidebar", row);
    }
    host.connect_in("palette", "palette-input");
    host
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let mut host = build_host();
    let mut shell = DocsShell::from_json(SITE)?;
    shell
        .router_mut()
        .navigation_events()
        .add_listener(|e: &mut Event<RouteChange>| {
            tracing::info!(view = %e.payload.to.view, params = ?e.payload.to.params, "navigated");
            Outcome::Continue
        });
    shell.on_mount(&mut host);

    // Sidebar: Down to Guides, open it, step in, choose Install.
    shell.focus_first(&mut host);
    for (now, key) in [Key::ArrowDown, Key::ArrowRight, Key::ArrowRight, Key::Enter]
        .into_iter()
        .enumerate()
    {
        shell.on_key(&mut host, &key.into(), now as u64 * 100);
    }
    tracing::info!(
        view = shell.current_view(),
        tab_stop = ?host.nodes_with(Attr::TabIndex, "0"),
        "after keyboard navigation"
    );

    // Typeahead: "c" jumps to Components.
    shell.on_key(&mut host, &Key::Character('c').into(), 1_000);
    tracing::info!(active = ?shell.nav().active_id(), "after typeahead");

    // Back button.
    shell.on_popstate(&mut host, "/components/tree-view");
    shell.on_popstate(&mut host, "/no/such/page");

    // Command palette: Ctrl+K, type, Enter.
    let mut palette = CommandPalette::new(
        "palette",
        "palette-input",
        vec![
            Command::new("changelog", "Open Changelog").with_keywords(["releases"]),
            Command::new("install", "Go to Install").with_keywords(["setup", "guide"]),
            Command::new("theming", "Go to Theming"),
        ],
    );
    host.focus("content");
    palette.on_global_key(&mut host, &KeyInput::with(Key::Character('k'), Modifiers::CTRL));
    palette.set_query(&mut host, "setup");
    tracing::info!(results = ?palette.results(), "palette filtered");
    if let Some(id) = palette.active().map(str::to_string)
        && palette.choose(&mut host, &id)
    {
        shell.open_view(&mut host, &id);
    }
    tracing::info!(
        view = shell.current_view(),
        focused = ?host.focused(),
        current = ?host.nodes_with(Attr::AriaCurrent, "page"),
        "after palette"
    );

    // Sidebar resize: drag the separator, then nudge it with the keyboard.
    let mut panels = ResizablePanels::new("separator", Orientation::Horizontal, 0.25);
    panels.set_container_size(1200.0);
    panels.events().add_listener(|e: &mut Event<PanelResize>| {
        tracing::info!(phase = ?e.payload.phase, ratio = e.payload.ratio, "resize");
        Outcome::Continue
    });
    panels.on_mount(&mut host);
    panels.pointer_down(&mut host, None, Point::new(300.0, 10.0));
    panels.pointer_move(&mut host, None, Point::new(420.0, 12.0));
    panels.pointer_up(&mut host, None, Point::new(480.0, 12.0));
    panels.on_key(&mut host, &Key::ArrowLeft.into(), 0);
    tracing::info!(
        ratio = panels.ratio(),
        listeners = host.active_listeners(),
        "after resize"
    );

    palette.open(&mut host, OpenTrigger::Shortcut);
    palette.on_unmount(&mut host);
    shell.on_unmount(&mut host);
    Ok(())
}
