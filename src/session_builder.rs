/*!
This module handles creation / initialization / building of [`Session`]s.
*/

use super::*;

/// This builder exposes the ability to configure a new [`Session`] to varying
/// degrees.
///
/// Generally speaking, when using `SessionBuilder`, you'll first call
/// [`SessionBuilder::new`] or [`Session::builder`], then chain calls to
/// methods to set each field, then call [`SessionBuilder::build`].
/// This will give you a [`Session`] as specified that you can then use as
/// normal. The `SessionBuilder` is not used up and its configuration can be
/// re-used to initialize more [`Session`]s.
#[derive(Eq, PartialEq, Clone, Hash, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionBuilder {
    /// The configuration options that will be set for the session.
    pub config: Configuration,
    /// The value to seed the session's PRNG with, or `None` to pick a
    /// thread-random seed at build time.
    pub seed: Option<u64>,
}

impl SessionBuilder {
    /// Creates a blank new template representing a yet-to-be-started
    /// [`Session`] ready for configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`Session`] with the information specified by `self`.
    ///
    /// The initial next-spawn value is drawn immediately so a UI can preview
    /// it before the first placement.
    ///
    /// # Panics
    ///
    /// Panics if the configured grid dimensions are zero (see [`Grid::new`]).
    pub fn build(&self) -> Session {
        let mut config = self.config.clone();
        let seed = self.seed.unwrap_or_else(rand::random);
        let mut rng = SessionRng::seed_from_u64(seed);
        let next_value = config.spawn_generator.generate(&mut rng);

        Session {
            grid: Grid::new(config.rows, config.columns),
            history: History::new(config.history_depth),
            next_value,
            seed,
            rng,
            config,
        }
    }

    /// Sets the [`Configuration`] that will be used by the [`Session`].
    pub fn config(&mut self, x: Configuration) -> &mut Self {
        self.config = x;
        self
    }

    /// The number of grid rows.
    pub fn rows(&mut self, x: usize) -> &mut Self {
        self.config.rows = x;
        self
    }
    /// The number of grid columns.
    pub fn columns(&mut self, x: usize) -> &mut Self {
        self.config.columns = x;
        self
    }
    /// The grid dimensions, as rows and columns.
    pub fn dimensions(&mut self, rows: usize, columns: usize) -> &mut Self {
        self.config.rows = rows;
        self.config.columns = columns;
        self
    }
    /// How many snapshots the undo history retains before evicting the
    /// oldest.
    pub fn history_depth(&mut self, x: usize) -> &mut Self {
        self.config.history_depth = x;
        self
    }
    /// The method of next-spawn-value generation used.
    pub fn spawn_generator(&mut self, x: SpawnGenerator) -> &mut Self {
        self.config.spawn_generator = x;
        self
    }

    /// The value to seed the session's PRNG with.
    pub fn seed(&mut self, x: u64) -> &mut Self {
        self.seed = Some(x);
        self
    }
}
