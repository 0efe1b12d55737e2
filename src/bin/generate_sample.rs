//! Writes a deterministic synthetic `data_set.csv` in the shape of the
//! joined Spotify/YouTube export, so the dashboard can be demoed without
//! the real dataset. Run with `cargo run --bin generate_sample`.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const OUTPUT_PATH: &str = "data_set.csv";
const TRACKS_PER_ARTIST: usize = 10;

/// (artist, youtube channel, danceability bias, energy bias, valence bias)
const ARTISTS: [(&str, &str, f64, f64, f64); 12] = [
    ("Gorillaz", "Gorillaz", 0.70, 0.65, 0.55),
    ("Red Hot Chili Peppers", "RHCPVEVO", 0.60, 0.85, 0.60),
    ("50 Cent", "50CentVEVO", 0.85, 0.75, 0.65),
    ("Metallica", "MetallicaTV", 0.45, 0.95, 0.40),
    ("Norah Jones", "NorahJonesVEVO", 0.50, 0.30, 0.45),
    ("Daft Punk", "DaftPunkVEVO", 0.80, 0.70, 0.70),
    ("Adele", "AdeleVEVO", 0.55, 0.45, 0.30),
    ("Ludovico Einaudi", "LudovicoEinaudiVEVO", 0.35, 0.20, 0.25),
    ("Shakira", "ShakiraVEVO", 0.85, 0.80, 0.85),
    ("Radiohead", "Radiohead", 0.45, 0.55, 0.25),
    ("Bob Marley & The Wailers", "BobMarleyVEVO", 0.75, 0.60, 0.90),
    ("Hans Zimmer", "HansZimmerVEVO", 0.30, 0.50, 0.35),
];

const WORDS_A: [&str; 8] = [
    "Midnight", "Golden", "Electric", "Silent", "Broken", "Neon", "Velvet", "Wild",
];
const WORDS_B: [&str; 8] = [
    "Horizon", "River", "Echoes", "Fire", "Dreams", "Road", "Heart", "Skyline",
];

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut writer = csv::Writer::from_path(OUTPUT_PATH)
        .with_context(|| format!("creating {OUTPUT_PATH}"))?;

    // Leading empty header: the export carries its row index as the first
    // column, which the loader discards.
    writer.write_record([
        "", "Track", "Artist", "Url_spotify", "Album", "Album_type", "Uri", "Danceability",
        "Energy", "Key", "Loudness", "Speechiness", "Acousticness", "Instrumentalness",
        "Liveness", "Valence", "Tempo", "Duration_ms", "Url_youtube", "Title", "Channel",
        "Views", "Likes", "Comments", "Description", "Licensed", "official_video", "Stream",
    ])?;

    let mut row = 0usize;
    for (artist, channel, dance_bias, energy_bias, valence_bias) in ARTISTS {
        for i in 0..TRACKS_PER_ARTIST {
            let track = format!(
                "{} {}",
                WORDS_A[rng.gen_range(0..WORDS_A.len())],
                WORDS_B[rng.gen_range(0..WORDS_B.len())]
            );
            let album_type = if rng.gen_bool(0.7) { "album" } else { "single" };
            let album = if album_type == "album" {
                format!("{artist} – Greatest Hits Vol. {}", 1 + i / 5)
            } else {
                track.clone()
            };

            let feature = |rng: &mut StdRng, bias: f64| -> f64 {
                (bias + rng.gen_range(-0.25..0.25)).clamp(0.0, 1.0)
            };
            let danceability = feature(&mut rng, dance_bias);
            let energy = feature(&mut rng, energy_bias);
            let valence = feature(&mut rng, valence_bias);
            let instrumentalness: f64 = if rng.gen_bool(0.15) {
                rng.gen_range(0.5..1.0)
            } else {
                rng.gen_range(0.0..0.2)
            };
            let liveness: f64 = if rng.gen_bool(0.1) {
                rng.gen_range(0.5..1.0)
            } else {
                rng.gen_range(0.02..0.35)
            };

            // Popularity: heavy-tailed, views roughly track streams.
            let stream = (10f64.powf(rng.gen_range(5.5..9.3))).round();
            let views = (stream * rng.gen_range(0.3..2.5)).round();
            let likes = (views * rng.gen_range(0.005..0.03)).round();
            let comments = (likes * rng.gen_range(0.01..0.1)).round();

            // The real export has gaps on the YouTube side and in Stream;
            // sprinkle a few so the NaN paths stay exercised.
            let stream_cell = if rng.gen_bool(0.03) {
                String::new()
            } else {
                format!("{stream:.1}")
            };
            let views_cell = if rng.gen_bool(0.05) {
                String::new()
            } else {
                format!("{views:.1}")
            };

            let slug = track.to_lowercase().replace(' ', "");
            writer.write_record([
                row.to_string(),
                track.clone(),
                artist.to_string(),
                format!("https://open.spotify.com/artist/{slug}"),
                album,
                album_type.to_string(),
                format!("spotify:track:{slug}{row}"),
                format!("{danceability:.3}"),
                format!("{energy:.3}"),
                rng.gen_range(-1..=11).to_string(),
                format!("{:.3}", rng.gen_range(-22.0..-1.0)),
                format!("{:.4}", rng.gen_range(0.02..0.3)),
                format!("{:.4}", rng.gen_range(0.0..0.9)),
                format!("{instrumentalness:.4}"),
                format!("{liveness:.4}"),
                format!("{valence:.3}"),
                format!("{:.2}", rng.gen_range(60.0..200.0)),
                rng.gen_range(120_000..420_000).to_string(),
                format!("https://www.youtube.com/watch?v={slug}{row}"),
                format!("{track} (Official Video)"),
                channel.to_string(),
                views_cell,
                format!("{likes:.1}"),
                format!("{comments:.1}"),
                format!("Official video for {track} by {artist}."),
                if rng.gen_bool(0.8) { "True" } else { "False" }.to_string(),
                if rng.gen_bool(0.75) { "True" } else { "False" }.to_string(),
                stream_cell,
            ])?;
            row += 1;
        }
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {row} tracks to {OUTPUT_PATH}");
    Ok(())
}
