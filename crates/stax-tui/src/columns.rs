//! Per-level table columns.
//!
//! Each hierarchy level renders a fixed, enumerated set of columns; the
//! mapping is a plain match over the three levels, not a runtime-built
//! configuration.

use ratatui::layout::Constraint;

use stax_proto::cursor::Level;
use stax_proto::folder::Folder;
use stax_proto::title::parse_album_title;

pub struct ColumnSpec {
    pub header: &'static str,
    pub width: Constraint,
    pub cell: fn(&Folder) -> String,
}

pub fn columns_for(level: Level) -> &'static [ColumnSpec] {
    match level {
        Level::Artist => ARTIST_COLUMNS,
        Level::Album => ALBUM_COLUMNS,
        Level::Track => TRACK_COLUMNS,
    }
}

const ARTIST_COLUMNS: &[ColumnSpec] = &[ColumnSpec {
    header: "Artist",
    width: Constraint::Fill(1),
    cell: cell_title,
}];

const ALBUM_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        header: "Album",
        width: Constraint::Fill(1),
        cell: cell_album_name,
    },
    ColumnSpec {
        header: "Year",
        width: Constraint::Length(6),
        cell: cell_album_year,
    },
];

const TRACK_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        header: "Disc",
        width: Constraint::Length(4),
        cell: cell_disc,
    },
    ColumnSpec {
        header: "#",
        width: Constraint::Length(3),
        cell: cell_track,
    },
    ColumnSpec {
        header: "Title",
        width: Constraint::Fill(1),
        cell: cell_title,
    },
    ColumnSpec {
        header: "Time",
        width: Constraint::Length(8),
        cell: cell_duration,
    },
    ColumnSpec {
        header: "Size",
        width: Constraint::Length(9),
        cell: cell_filesize,
    },
];

fn cell_title(f: &Folder) -> String {
    f.title.clone()
}

// Album rows carry the year inside the raw title; show the parsed halves.
fn cell_album_name(f: &Folder) -> String {
    parse_album_title(&f.title).album
}

fn cell_album_year(f: &Folder) -> String {
    parse_album_title(&f.title).year
}

fn cell_disc(f: &Folder) -> String {
    f.disc.map(|d| d.to_string()).unwrap_or_default()
}

fn cell_track(f: &Folder) -> String {
    f.track.map(|t| t.to_string()).unwrap_or_default()
}

fn cell_duration(f: &Folder) -> String {
    f.duration_string.clone().unwrap_or_default()
}

fn cell_filesize(f: &Folder) -> String {
    f.filesize_string.clone().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artist_level_shows_only_the_title() {
        let cols = columns_for(Level::Artist);
        assert_eq!(cols.len(), 1);
        let folder = Folder {
            title: "Hill, Andrew".into(),
            ..Folder::default()
        };
        assert_eq!((cols[0].cell)(&folder), "Hill, Andrew");
    }

    #[test]
    fn album_level_splits_year_from_name() {
        let cols = columns_for(Level::Album);
        let folder = Folder {
            title: "[1964] Point of Departure".into(),
            ..Folder::default()
        };
        assert_eq!((cols[0].cell)(&folder), "Point of Departure");
        assert_eq!((cols[1].cell)(&folder), "1964");
    }

    #[test]
    fn track_cells_render_blank_for_missing_metadata() {
        let cols = columns_for(Level::Track);
        let folder = Folder {
            title: "Refuge".into(),
            ..Folder::default()
        };
        let cells: Vec<String> = cols.iter().map(|c| (c.cell)(&folder)).collect();
        assert_eq!(cells, ["", "", "Refuge", "", ""]);
    }
}
