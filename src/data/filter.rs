use super::model::{col, DataError, TrackTable};

// ---------------------------------------------------------------------------
// Criterion variants
// ---------------------------------------------------------------------------

/// How much the listener wants to dance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DanceLevel {
    NotAtAll,
    ALittle,
    NoPreference,
    LetsParty,
}

impl DanceLevel {
    pub const ALL: [DanceLevel; 4] = [
        DanceLevel::NotAtAll,
        DanceLevel::ALittle,
        DanceLevel::NoPreference,
        DanceLevel::LetsParty,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DanceLevel::NotAtAll => "Not at all",
            DanceLevel::ALittle => "A little",
            DanceLevel::NoPreference => "Doesn't matter",
            DanceLevel::LetsParty => "Let's party!",
        }
    }

    /// Note the asymmetry: `ALittle` is half-open at 0.6 while `LetsParty`
    /// is inclusive from 0.7, so (0.6, 0.7) belongs to no dance bucket.
    fn admits(self, danceability: f64) -> bool {
        match self {
            DanceLevel::NotAtAll => danceability < 0.4,
            DanceLevel::ALittle => (0.4..0.6).contains(&danceability),
            DanceLevel::NoPreference => true,
            DanceLevel::LetsParty => danceability >= 0.7,
        }
    }
}

/// Desired energy level. Unlike dance and mood there is no pass-all
/// variant; all three buckets filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyLevel {
    Low,
    Medium,
    High,
}

impl EnergyLevel {
    pub const ALL: [EnergyLevel; 3] = [EnergyLevel::Low, EnergyLevel::Medium, EnergyLevel::High];

    pub fn label(self) -> &'static str {
        match self {
            EnergyLevel::Low => "Low / Relaxed",
            EnergyLevel::Medium => "Medium / Normal",
            EnergyLevel::High => "High / Energetic",
        }
    }

    fn admits(self, energy: f64) -> bool {
        match self {
            EnergyLevel::Low => energy < 0.4,
            EnergyLevel::Medium => (0.4..0.7).contains(&energy),
            EnergyLevel::High => energy >= 0.7,
        }
    }
}

/// Desired musical positiveness (valence).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Sad,
    Neutral,
    Happy,
}

impl Mood {
    pub const ALL: [Mood; 3] = [Mood::Sad, Mood::Neutral, Mood::Happy];

    pub fn label(self) -> &'static str {
        match self {
            Mood::Sad => "Sad / Melancholic",
            Mood::Neutral => "Neutral",
            Mood::Happy => "Happy / Cheerful",
        }
    }

    /// `Happy` is strictly above 0.6, `Sad` strictly below 0.4; valences
    /// in [0.4, 0.6] only surface under `Neutral`. Intentional.
    fn admits(self, valence: f64) -> bool {
        match self {
            Mood::Sad => valence < 0.4,
            Mood::Neutral => true,
            Mood::Happy => valence > 0.6,
        }
    }
}

// ---------------------------------------------------------------------------
// SongCriteria – the six independent filters of the recommendation page
// ---------------------------------------------------------------------------

/// All filters are combined with logical AND. Rows whose feature value is
/// NaN fail every threshold comparison and so drop out of any bucketed
/// criterion, while pass-all variants keep them.
#[derive(Debug, Clone, PartialEq)]
pub struct SongCriteria {
    pub dance: DanceLevel,
    pub energy: EnergyLevel,
    pub mood: Mood,
    /// Inclusive stream-count window, in millions of streams.
    pub stream_millions: (u64, u64),
    pub instrumental_only: bool,
    pub live_only: bool,
}

impl Default for SongCriteria {
    fn default() -> Self {
        SongCriteria {
            dance: DanceLevel::NoPreference,
            energy: EnergyLevel::Medium,
            mood: Mood::Neutral,
            stream_millions: (0, u64::MAX),
            instrumental_only: false,
            live_only: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of rows satisfying every active criterion, in table
/// order. Pure: same table and criteria always yield the same indices.
pub fn filtered_indices(
    table: &TrackTable,
    criteria: &SongCriteria,
) -> Result<Vec<usize>, DataError> {
    let dance = table.numeric(col::DANCEABILITY)?;
    let energy = table.numeric(col::ENERGY)?;
    let valence = table.numeric(col::VALENCE)?;
    let instrumental = table.numeric(col::INSTRUMENTALNESS)?;
    let liveness = table.numeric(col::LIVENESS)?;
    let stream = table.numeric(col::STREAM)?;

    let lo = criteria.stream_millions.0.saturating_mul(1_000_000) as f64;
    let hi = criteria.stream_millions.1.saturating_mul(1_000_000) as f64;

    Ok((0..table.len())
        .filter(|&i| {
            criteria.dance.admits(dance[i])
                && criteria.energy.admits(energy[i])
                && criteria.mood.admits(valence[i])
                && stream[i] >= lo
                && stream[i] <= hi
                && (!criteria.instrumental_only || instrumental[i] > 0.5)
                && (!criteria.live_only || liveness[i] > 0.5)
        })
        .collect())
}

/// Order `indices` by stream count descending and keep the first `limit`.
/// The sort is stable, so ties keep their original table order; NaN stream
/// counts sort last.
pub fn top_streamed(
    table: &TrackTable,
    indices: &[usize],
    limit: usize,
) -> Result<Vec<usize>, DataError> {
    let stream = table.numeric(col::STREAM)?;
    let key = |i: usize| {
        let v = stream[i];
        if v.is_nan() {
            f64::NEG_INFINITY
        } else {
            v
        }
    };

    let mut order: Vec<usize> = indices.to_vec();
    order.sort_by(|&a, &b| key(b).total_cmp(&key(a)));
    order.truncate(limit);
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    /// Table with the feature columns the filter reads. Streams default to
    /// a wide spread so the stream window stays out of the way.
    fn table(
        dance: Vec<f64>,
        energy: Vec<f64>,
        valence: Vec<f64>,
        instrumental: Vec<f64>,
        liveness: Vec<f64>,
        stream: Vec<f64>,
    ) -> TrackTable {
        TrackTable::new(
            vec![
                col::DANCEABILITY.into(),
                col::ENERGY.into(),
                col::VALENCE.into(),
                col::INSTRUMENTALNESS.into(),
                col::LIVENESS.into(),
                col::STREAM.into(),
            ],
            vec![
                Column::Float(dance),
                Column::Float(energy),
                Column::Float(valence),
                Column::Float(instrumental),
                Column::Float(liveness),
                Column::Float(stream),
            ],
        )
    }

    fn feature_table(dance: Vec<f64>) -> TrackTable {
        let n = dance.len();
        table(
            dance,
            vec![0.5; n],
            vec![0.5; n],
            vec![0.0; n],
            vec![0.0; n],
            (0..n).map(|i| (i as f64 + 1.0) * 1_000_000.0).collect(),
        )
    }

    fn wide_open() -> SongCriteria {
        SongCriteria::default()
    }

    #[test]
    fn dance_buckets_match_the_scenario() {
        let t = feature_table(vec![0.1, 0.45, 0.65, 0.95]);

        let mut c = wide_open();
        c.dance = DanceLevel::NotAtAll;
        assert_eq!(filtered_indices(&t, &c).unwrap(), vec![0]);

        c.dance = DanceLevel::LetsParty;
        assert_eq!(filtered_indices(&t, &c).unwrap(), vec![3]);

        c.dance = DanceLevel::ALittle;
        assert_eq!(filtered_indices(&t, &c).unwrap(), vec![1]);

        c.dance = DanceLevel::NoPreference;
        assert_eq!(filtered_indices(&t, &c).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn danceability_boundary_at_0_4_is_inclusive_for_a_little_only() {
        let t = feature_table(vec![0.4]);

        let mut c = wide_open();
        c.dance = DanceLevel::NotAtAll;
        assert!(filtered_indices(&t, &c).unwrap().is_empty());

        c.dance = DanceLevel::ALittle;
        assert_eq!(filtered_indices(&t, &c).unwrap(), vec![0]);
    }

    #[test]
    fn valence_0_6_stays_out_of_happy() {
        let n = 1;
        let t = table(
            vec![0.5; n],
            vec![0.5; n],
            vec![0.6],
            vec![0.0; n],
            vec![0.0; n],
            vec![1_000_000.0],
        );

        let mut c = wide_open();
        c.mood = Mood::Happy;
        assert!(filtered_indices(&t, &c).unwrap().is_empty());

        // ...but the sad bucket does not claim it either.
        c.mood = Mood::Sad;
        assert!(filtered_indices(&t, &c).unwrap().is_empty());

        c.mood = Mood::Neutral;
        assert_eq!(filtered_indices(&t, &c).unwrap(), vec![0]);
    }

    #[test]
    fn energy_buckets_cover_their_boundaries() {
        let t = table(
            vec![0.5; 4],
            vec![0.39, 0.4, 0.69, 0.7],
            vec![0.5; 4],
            vec![0.0; 4],
            vec![0.0; 4],
            vec![1_000_000.0; 4],
        );

        let mut c = wide_open();
        c.energy = EnergyLevel::Low;
        assert_eq!(filtered_indices(&t, &c).unwrap(), vec![0]);
        c.energy = EnergyLevel::Medium;
        assert_eq!(filtered_indices(&t, &c).unwrap(), vec![1, 2]);
        c.energy = EnergyLevel::High;
        assert_eq!(filtered_indices(&t, &c).unwrap(), vec![3]);
    }

    #[test]
    fn stream_window_is_inclusive_on_both_ends() {
        let t = table(
            vec![0.5; 3],
            vec![0.5; 3],
            vec![0.5; 3],
            vec![0.0; 3],
            vec![0.0; 3],
            vec![5_000_000.0, 10_000_000.0, 20_000_000.0],
        );

        let mut c = wide_open();
        c.stream_millions = (5, 10);
        assert_eq!(filtered_indices(&t, &c).unwrap(), vec![0, 1]);
    }

    #[test]
    fn full_stream_range_returns_the_whole_table() {
        let t = feature_table(vec![0.2, 0.5, 0.8, 0.9, 0.3]);
        let mut c = wide_open();
        // Upper bound: the table's true maximum (5M), rounded up.
        c.stream_millions = (0, 5);
        assert_eq!(filtered_indices(&t, &c).unwrap().len(), t.len());
    }

    #[test]
    fn instrumental_and_live_toggles_use_strict_thresholds() {
        let t = table(
            vec![0.5; 3],
            vec![0.5; 3],
            vec![0.5; 3],
            vec![0.5, 0.51, 0.9],
            vec![0.5, 0.51, 0.9],
            vec![1_000_000.0; 3],
        );

        let mut c = wide_open();
        c.instrumental_only = true;
        assert_eq!(filtered_indices(&t, &c).unwrap(), vec![1, 2]);

        c.instrumental_only = false;
        c.live_only = true;
        assert_eq!(filtered_indices(&t, &c).unwrap(), vec![1, 2]);
    }

    #[test]
    fn filtering_is_pure_and_conjunctive() {
        let t = table(
            vec![0.2, 0.5, 0.8, 0.45],
            vec![0.3, 0.5, 0.9, 0.6],
            vec![0.1, 0.5, 0.9, 0.5],
            vec![0.0; 4],
            vec![0.0; 4],
            vec![1_000_000.0; 4],
        );

        let mut a = wide_open();
        a.dance = DanceLevel::ALittle;
        let only_dance = filtered_indices(&t, &a).unwrap();
        assert_eq!(only_dance, filtered_indices(&t, &a).unwrap());

        let mut ab = a.clone();
        ab.energy = EnergyLevel::Medium;
        let both = filtered_indices(&t, &ab).unwrap();
        assert!(both.iter().all(|i| only_dance.contains(i)));
    }

    #[test]
    fn nan_features_fail_bucketed_criteria_but_pass_no_preference() {
        let t = feature_table(vec![f64::NAN, 0.5]);

        let mut c = wide_open();
        c.dance = DanceLevel::ALittle;
        assert_eq!(filtered_indices(&t, &c).unwrap(), vec![1]);

        c.dance = DanceLevel::NoPreference;
        assert_eq!(filtered_indices(&t, &c).unwrap(), vec![0, 1]);
    }

    #[test]
    fn top_streamed_sorts_descending_with_stable_ties() {
        let t = table(
            vec![0.5; 5],
            vec![0.5; 5],
            vec![0.5; 5],
            vec![0.0; 5],
            vec![0.0; 5],
            vec![500.0, 300.0, 300.0, 100.0, 50.0],
        );

        let top = top_streamed(&t, &[0, 1, 2, 3, 4], 2).unwrap();
        // 500 first, then the earlier of the two 300s.
        assert_eq!(top, vec![0, 1]);

        let all = top_streamed(&t, &[0, 1, 2, 3, 4], 10).unwrap();
        assert_eq!(all, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn top_streamed_puts_nan_streams_last() {
        let t = table(
            vec![0.5; 3],
            vec![0.5; 3],
            vec![0.5; 3],
            vec![0.0; 3],
            vec![0.0; 3],
            vec![f64::NAN, 300.0, 500.0],
        );
        assert_eq!(top_streamed(&t, &[0, 1, 2], 3).unwrap(), vec![2, 1, 0]);
    }

    #[test]
    fn missing_feature_column_is_reported() {
        let t = TrackTable::new(
            vec![col::DANCEABILITY.into()],
            vec![Column::Float(vec![0.5])],
        );
        assert!(matches!(
            filtered_indices(&t, &wide_open()),
            Err(DataError::UnknownColumn(_))
        ));
    }
}
