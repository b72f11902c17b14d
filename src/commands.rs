//! Command handlers: one per CLI subcommand, all going through the controller

use anyhow::{Context, Result, anyhow, bail};
use tracing::{error, warn};

use crate::cli::Commands;
use crate::config::Config;
use crate::controller::{ListController, ListState};
use crate::error::ListError;
use crate::geometry::Point;
use crate::interaction::{self, ClickOutcome};
use crate::location::Location;
use crate::store::{KeyValueStore, VisitedBooths};
use crate::venue::{MapStand, VenueData};

/// Everything a command needs for one invocation
pub struct Session<S, L> {
    pub controller: ListController<S, L>,
    pub venue: Option<VenueData>,
    pub config: Config,
}

impl<S: KeyValueStore, L: Location> Session<S, L> {
    fn venue(&self) -> Result<&VenueData> {
        self.venue
            .as_ref()
            .ok_or_else(|| anyhow!("No venue dataset loaded; pass --dataset or set \"dataset\" in {:?}", Config::path()))
    }

    fn exhibitor_title(&self, label: &str) -> Option<String> {
        self.venue
            .as_ref()
            .and_then(|venue| venue.merged_exhibitor(label))
            .map(|merged| merged.title)
    }

    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Show => self.show(),
            Commands::Toggle { label } => {
                let favorite = rejectable(self.controller.toggle_favorite(&label))?;
                if let Some(favorite) = favorite {
                    println!("{} {label}", if favorite { "Added" } else { "Removed" });
                }
                Ok(())
            }
            Commands::Click { x, y, hall } => self.click(Point::new(x, y), hall.as_deref()),
            Commands::Create { name } => {
                if rejectable(self.controller.create_list(&name))?.is_some() {
                    println!("Created list '{}'", name.trim());
                }
                Ok(())
            }
            Commands::Switch { name } => {
                if rejectable(self.controller.switch_list(&name))?.is_some() {
                    println!("Switched to list '{name}'");
                }
                Ok(())
            }
            Commands::Delete { name } => {
                if rejectable(self.controller.delete_list(&name))?.is_some() {
                    println!("Deleted list '{name}'");
                    match self.controller.active_key() {
                        Some(key) => println!("Active list: {key}"),
                        None => println!("No lists left; create one to start favoriting"),
                    }
                }
                Ok(())
            }
            Commands::Lists { detail } => self.lists(detail),
            Commands::Share => {
                match self.controller.share_link(&self.config.share_base_url) {
                    Some(link) => println!("{link}"),
                    None => println!("No active list to share"),
                }
                Ok(())
            }
            Commands::Open { link } => {
                self.controller.open(&link);
                self.show()
            }
            Commands::Visited { label } => {
                let store = self.controller.store_mut().backend_mut();
                let mut visited = VisitedBooths::load(&*store);
                let marked = visited
                    .toggle(store, &label)
                    .with_context(|| format!("Failed to save visited mark for {label}"))?;
                println!("{label}: {}", if marked { "visited" } else { "not visited" });
                Ok(())
            }
            Commands::Halls => {
                for map in &self.venue()?.maps {
                    let bounds = map
                        .bounds()
                        .map(|b| format!("{} {} .. {} {}", b.x_min, b.y_min, b.x_max, b.y_max))
                        .unwrap_or_else(|| "invalid bounds".to_string());
                    println!("{} ({} booths, {bounds})", map.title, map.stands.len());
                    if !map.flattened_image.is_empty() {
                        println!("    image: {}", map.flattened_image);
                    }
                }
                Ok(())
            }
            Commands::Booth { label } => self.booth(&label),
        }
    }

    fn show(&self) -> Result<()> {
        match self.controller.state() {
            ListState::Active(selection) => {
                println!("Active list: {}", selection.key);
                if selection.booths.is_empty() {
                    println!("  (no booths yet)");
                }
                for label in &selection.booths {
                    match self.exhibitor_title(label) {
                        Some(title) => println!("  {label}  {title}"),
                        None => println!("  {label}"),
                    }
                }
            }
            ListState::NoListSelected | ListState::Uninitialized => {
                println!("No list selected. Create a list before favoriting booths.");
            }
        }
        Ok(())
    }

    fn click(&mut self, point: Point, hall: Option<&str>) -> Result<()> {
        let venue = self.venue()?;
        let map = venue
            .find_map(hall)
            .ok_or_else(|| anyhow!("No hall named {:?}", hall.unwrap_or("<first>")))?;
        let stands = venue.map_stands(map);

        let outcome = interaction::click(&mut self.controller, &stands, point);
        println!("{}", describe_click(&outcome, &stands, point));
        Ok(())
    }

    fn lists(&self, detail: bool) -> Result<()> {
        for line in self.list_overview(detail) {
            println!("{line}");
        }
        Ok(())
    }

    /// Overview of the lists known after the last refresh, active one starred
    fn list_overview(&self, detail: bool) -> Vec<String> {
        let keys = self.controller.available_lists();
        if keys.is_empty() {
            return vec!["No lists found in storage.".to_string()];
        }

        let active = self.controller.active_key();
        let visited = VisitedBooths::load(self.controller.store().backend());
        let mut lines = Vec::new();
        for key in keys {
            let booths = self.controller.store().get(key);
            let marker = if Some(key.as_str()) == active { "*" } else { " " };
            lines.push(format!("{marker} {key} ({} booths)", booths.len()));
            if !detail {
                continue;
            }
            if booths.is_empty() {
                lines.push("    No booths in this list.".to_string());
            }
            for label in &booths {
                let check = if visited.is_visited(label) { "[x]" } else { "[ ]" };
                match self.exhibitor_title(label) {
                    Some(title) => lines.push(format!("    {check} {label} {title}")),
                    None => lines.push(format!("    {check} {label}")),
                }
            }
        }
        lines
    }

    fn booth(&self, label: &str) -> Result<()> {
        let venue = self.venue()?;
        let Some(merged) = venue.merged_exhibitor(label) else {
            bail!("No exhibitor at booth {label}");
        };

        println!("{}  {}", merged.stand, merged.title);
        if merged.all.len() > 1 {
            println!("Shared by {} exhibitors", merged.all.len());
        }
        let description = merged.description.trim();
        if !description.is_empty() {
            println!("{description}");
        }
        if !merged.website.is_empty() {
            println!("Website: {}", merged.website);
        }
        if !merged.url.is_empty() {
            println!("Details: {}", merged.url);
        }
        if let Some(logo) = &merged.logo {
            println!("Logo: {logo}");
        }
        println!(
            "{}",
            if self.controller.is_favorite(label) { "★ Favorite" } else { "☆ Not a favorite" }
        );
        Ok(())
    }
}

/// One line for the result of a map click, naming the hit booth's exhibitor
fn describe_click(outcome: &ClickOutcome, stands: &[MapStand], point: Point) -> String {
    match outcome {
        ClickOutcome::Toggled { label, favorite } => {
            let verb = if *favorite { "Added" } else { "Removed" };
            match stands.iter().find(|stand| &stand.label == label) {
                Some(stand) => format!("{verb} {label} ({})", stand.exhibitor.title),
                None => format!("{verb} {label}"),
            }
        }
        ClickOutcome::Missed => format!("No booth at ({}, {})", point.x, point.y),
        ClickOutcome::NoActiveList => {
            "No list selected. Create a list before favoriting booths.".to_string()
        }
    }
}

/// Rejected list operations are reported, not fatal
fn rejectable<T>(result: Result<T, ListError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ListError::Storage(msg)) => {
            error!(error = %msg, "Storage failure");
            Err(anyhow!(msg))
        }
        Err(e) => {
            warn!(error = %e, "Operation not applied");
            println!("{e}");
            Ok(None)
        }
    }
}
