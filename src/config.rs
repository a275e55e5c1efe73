//! Application-level configuration loading, including the course catalog that
//! seasons draw their weekly venues from.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "CLUBHOUSE_BACK_CONFIG_PATH";

/// Broad character of a course, used by clients for theming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseCategory {
    /// Traditional seaside links terrain.
    Links,
    /// Ocean-adjacent layouts.
    Coastal,
    /// Tree-lined inland courses.
    Parkland,
    /// Arid-landscape layouts.
    Desert,
    /// Resort and destination courses.
    Resort,
    /// Tournament-caliber tests.
    Championship,
}

/// One venue from the catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Course {
    /// Course name.
    pub name: String,
    /// Where the course is.
    pub location: String,
    /// Par for a full round.
    pub par: u32,
    /// Broad character of the course.
    pub category: CourseCategory,
    /// Flavor text shown on the round screen.
    pub description: String,
}

/// Immutable runtime configuration shared across the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    courses: Vec<Course>,
    scorecard_worker_url: Option<String>,
}

impl AppConfig {
    /// Load the configuration from disk, falling back to the baked-in course
    /// catalog when the file is absent or unreadable.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        courses = config.courses.len(),
                        "loaded course catalog from config"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// The full course catalog.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Endpoint of the remote scorecard OCR worker, when configured.
    pub fn scorecard_worker_url(&self) -> Option<&str> {
        self.scorecard_worker_url.as_deref()
    }

    /// Draw `count` courses for a new season: a uniform shuffle keeps them
    /// unique until the catalog is exhausted, then the draw cycles.
    pub fn draw_courses(&self, count: u32) -> Vec<Course> {
        let mut pool = self.courses.clone();
        let mut rng = rand::rng();
        pool.shuffle(&mut rng);

        (0..count as usize)
            .map(|index| pool[index % pool.len()].clone())
            .collect()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            courses: default_courses(),
            scorecard_worker_url: None,
        }
    }
}

/// JSON representation of the configuration file.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    courses: Vec<Course>,
    #[serde(default)]
    scorecard_worker_url: Option<String>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let courses = if value.courses.is_empty() {
            warn!("config lists no courses; using the built-in catalog");
            default_courses()
        } else {
            value.courses
        };

        Self {
            courses,
            scorecard_worker_url: value
                .scorecard_worker_url
                .filter(|url| !url.trim().is_empty()),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn course(
    name: &str,
    location: &str,
    par: u32,
    category: CourseCategory,
    description: &str,
) -> Course {
    Course {
        name: name.into(),
        location: location.into(),
        par,
        category,
        description: description.into(),
    }
}

/// Built-in course catalog shipped with the binary.
fn default_courses() -> Vec<Course> {
    vec![
        course(
            "Del Monte",
            "Monterey, CA",
            72,
            CourseCategory::Parkland,
            "One of the oldest continuously operating courses west of the Mississippi, winding through the storied pines of the Monterey Peninsula since 1897.",
        ),
        course(
            "MacGregor Downs",
            "Cary, NC",
            72,
            CourseCategory::Parkland,
            "A respected private club in the Research Triangle with tight fairways through mature Piedmont hardwoods and well-bunkered greens.",
        ),
        course(
            "Blue Hill Championship",
            "Canton, MA",
            72,
            CourseCategory::Parkland,
            "Blue Hill's flagship layout rolls through New England terrain with demanding par-4s and deceptively quick greens.",
        ),
        course(
            "Brookside",
            "Pasadena, CA",
            72,
            CourseCategory::Parkland,
            "Set in the shadow of the Rose Bowl, Brookside meanders through towering sycamores and has hosted professional events for decades.",
        ),
        course(
            "The Club at Renaissance",
            "Fort Myers, FL",
            72,
            CourseCategory::Resort,
            "A dramatic design through lush preserve land with sweeping elevation changes rare for Southwest Florida.",
        ),
        course(
            "The Golf Club of Amelia Island",
            "Fernandina Beach, FL",
            72,
            CourseCategory::Coastal,
            "Weaves through native maritime forest and salt marshes where ocean breezes make club selection crucial.",
        ),
        course(
            "Vero Beach Country Club",
            "Vero Beach, FL",
            72,
            CourseCategory::Resort,
            "A polished Treasure Coast club where tropical crosswinds test every approach shot.",
        ),
        course(
            "Pebble Beach Golf Links",
            "Pebble Beach, CA",
            72,
            CourseCategory::Coastal,
            "The most famous public course in America, hugging the cliffs above Carmel Bay with the ocean in play on half the holes.",
        ),
        course(
            "Spyglass Hill Golf Course",
            "Pebble Beach, CA",
            72,
            CourseCategory::Coastal,
            "Opens among the dunes before diving into the Del Monte Forest; widely considered the sternest test on the Monterey Peninsula.",
        ),
        course(
            "The Links at Spanish Bay",
            "Pebble Beach, CA",
            72,
            CourseCategory::Links,
            "A true links experience on the California coast, with fescue-covered dunes and firm, fast-running ground.",
        ),
        course(
            "Tobacco Road Golf Club",
            "Sanford, NC",
            71,
            CourseCategory::Championship,
            "Mike Strantz's wildly imaginative Sandhills design of blind shots and massive waste areas; golfers love it or hate it.",
        ),
        course(
            "Rams Hill Golf Club",
            "Borrego Springs, CA",
            72,
            CourseCategory::Desert,
            "A lush oasis ringed by the Anza-Borrego desert, with dramatic mountain backdrops on every hole.",
        ),
        course(
            "Pinehurst No. 2",
            "Pinehurst, NC",
            70,
            CourseCategory::Championship,
            "Donald Ross's masterpiece and a recurring U.S. Open host, famous for its crowned, turtle-back greens.",
        ),
        course(
            "Royal Troon Golf Club",
            "Scotland, UK",
            71,
            CourseCategory::Links,
            "A storied Open Championship venue on the Ayrshire coast, home to the infamous Postage Stamp par-3.",
        ),
        course(
            "Valderrama",
            "Sotogrande, Spain",
            71,
            CourseCategory::Championship,
            "The Ryder Cup's first continental host, where cork oaks pinch every landing area and par is a fine score.",
        ),
        course(
            "Sentosa Golf Club",
            "Singapore",
            71,
            CourseCategory::Resort,
            "Tournament golf on an island resort, with manicured conditioning and skyline views over the Singapore Strait.",
        ),
        course(
            "Greenbrier Old White TPC",
            "White Sulphur Springs, WV",
            70,
            CourseCategory::Resort,
            "Dating to 1914, the C.B. Macdonald design winds through the West Virginia mountains with classic template holes.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn draws_are_unique_while_the_catalog_lasts() {
        let config = AppConfig::default();
        let drawn = config.draw_courses(10);
        assert_eq!(drawn.len(), 10);

        let names: HashSet<&str> = drawn.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn draws_cycle_when_a_season_outgrows_the_catalog() {
        let config = AppConfig::default();
        let catalog_size = config.courses().len() as u32;
        let drawn = config.draw_courses(catalog_size + 3);

        assert_eq!(drawn.len(), (catalog_size + 3) as usize);
        // The overflow repeats the head of the shuffled pool.
        assert_eq!(drawn[catalog_size as usize].name, drawn[0].name);
    }

    #[test]
    fn built_in_catalog_is_usable() {
        let config = AppConfig::default();
        assert!(!config.courses().is_empty());
        assert!(config.courses().iter().all(|c| (68..=73).contains(&c.par)));
        assert!(config.scorecard_worker_url().is_none());
    }
}
