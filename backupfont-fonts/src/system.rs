//! System font discovery.
//!
//! Resolves family names to font files through `fontdb`, so a fallback list
//! can be assembled from installed fonts instead of hand-typed paths.

use std::path::PathBuf;

use fontdb::{Database, Family, Query, Source};

/// An installed font file matching a family name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedFont {
    pub family: String,
    pub path: PathBuf,
    /// Face index inside the file. The scanner only reads face 0, so a
    /// non-zero index means the wrong face of a collection would be scanned.
    pub face_index: u32,
}

/// Database of installed fonts.
pub struct SystemFonts {
    db: Database,
}

impl SystemFonts {
    /// Load every font installed on the system.
    pub fn load() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::info!("Loaded {} system fonts", db.len());
        Self { db }
    }

    /// Use an already populated database.
    pub fn from_database(db: Database) -> Self {
        Self { db }
    }

    pub fn len(&self) -> usize {
        self.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.len() == 0
    }

    /// Regular-weight, upright face for `family_name`, if installed as a file.
    pub fn locate(&self, family_name: &str) -> Option<LocatedFont> {
        let query = Query {
            families: &[Family::Name(family_name)],
            weight: fontdb::Weight::NORMAL,
            style: fontdb::Style::Normal,
            ..Query::default()
        };

        let id = self.db.query(&query)?;
        let face = self.db.face(id)?;
        let path = match &face.source {
            Source::File(path) => path.clone(),
            Source::SharedFile(path, _) => path.clone(),
            Source::Binary(_) => {
                log::debug!("Family '{}' is only available in memory", family_name);
                return None;
            }
        };

        if face.index != 0 {
            log::warn!(
                "Family '{}' is face {} of {:?}; only face 0 is scanned",
                family_name,
                face.index,
                path
            );
        }

        Some(LocatedFont {
            family: family_name.to_string(),
            path,
            face_index: face.index,
        })
    }
}
