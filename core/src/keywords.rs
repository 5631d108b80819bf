//! Output-template keywords (`%(title)s`, `%(playlist_index)3d`).
use lazy_static::lazy_static;
use regex::Regex;

pub const KEYWORD_PATTERN: &str = r"%\((\w+)\)(?:s{1}|(\d+)d)";

lazy_static! {
    static ref KEYWORD_RE: Regex = Regex::new(KEYWORD_PATTERN).expect("KEYWORD_PATTERN is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyword {
    pub name: &'static str,
    pub is_numeric: bool,
    pub description: &'static str,
}

const fn kw(name: &'static str, is_numeric: bool, description: &'static str) -> Keyword {
    Keyword {
        name,
        is_numeric,
        description,
    }
}

static KEYWORDS: [Keyword; 72] = [
    kw("id", false, "Video identifier"),
    kw("title", false, "Video title"),
    kw("url", false, "Video URL"),
    kw("ext", false, "Video filename extension"),
    kw("alt_title", false, "A secondary title of the video"),
    kw("display_id", false, "An alternative identifier for the video"),
    kw("uploader", false, "Full name of the video uploader"),
    kw("license", false, "License name the video is licensed under"),
    kw("creator", false, "The creator of the video"),
    kw("release_date", false, "The date (YYYYMMDD) when the video was released"),
    kw("timestamp", true, "UNIX timestamp of the moment the video became available"),
    kw("upload_date", false, "Video upload date (YYYYMMDD)"),
    kw("uploader_id", false, "Nickname or id of the video uploader"),
    kw("location", false, "Physical location where the video was filmed"),
    kw("duration", true, "Length of the video in seconds"),
    kw("view_count", true, "How many users have watched the video on the platform"),
    kw("like_count", true, "Number of positive ratings of the video"),
    kw("dislike_count", true, "Number of negative ratings of the video"),
    kw("repost_count", true, "Number of reposts of the video"),
    kw("average_rating", true, "Average rating give by users, the scale used depends on the webpage"),
    kw("comment_count", true, "Number of comments on the video"),
    kw("age_limit", true, "Age restriction for the video (years)"),
    kw("is_live", false, "Whether this video is a live stream or a fixed-length video"),
    kw("start_time", true, "Time in seconds where the reproduction should start, as specified in the URL"),
    kw("end_time", true, "Time in seconds where the reproduction should end, as specified in the URL"),
    kw("format", false, "A human-readable description of the format"),
    kw("format_id", false, "Format code specified by `--format`"),
    kw("format_note", false, "Additional info about the format"),
    kw("width", true, "Width of the video"),
    kw("height", true, "Height of the video"),
    kw("resolution", false, "Textual description of width and height"),
    kw("tbr", true, "Average bitrate of audio and video in KBit/s"),
    kw("abr", true, "Average audio bitrate in KBit/s"),
    kw("acodec", false, "Name of the audio codec in use"),
    kw("asr", true, "Audio sampling rate in Hertz"),
    kw("vbr", true, "Average video bitrate in KBit/s"),
    kw("fps", true, "Frame rate"),
    kw("vcodec", false, "Name of the video codec in use"),
    kw("container", false, "Name of the container format"),
    kw("filesize", true, "The number of bytes, if known in advance"),
    kw("filesize_approx", true, "An estimate for the number of bytes"),
    kw("protocol", false, "The protocol that will be used for the actual download"),
    kw("extractor", false, "Name of the extractor"),
    kw("extractor_key", false, "Key name of the extractor"),
    kw("epoch", true, "Unix epoch when creating the file"),
    kw("autonumber", true, "Five-digit number that will be increased with each download, starting at zero"),
    kw("playlist", false, "Name or id of the playlist that contains the video"),
    kw("playlist_index", true, "Index of the video in the playlist padded with leading zeros according to the total length of the playlist"),
    kw("playlist_id", false, "Playlist identifier"),
    kw("playlist_title", false, "Playlist title"),
    kw("playlist_uploader", false, "Full name of the playlist uploader"),
    kw("playlist_uploader_id", false, "Nickname or id of the playlist uploader"),
    kw("chapter", false, "Name or title of the chapter the video belongs to"),
    kw("chapter_number", true, "Number of the chapter the video belongs to"),
    kw("chapter_id", false, "Id of the chapter the video belongs to"),
    kw("series", false, "Title of the series or programme the video episode belongs to"),
    kw("season", false, "Title of the season the video episode belongs to"),
    kw("season_number", true, "Number of the season the video episode belongs to"),
    kw("season_id", false, "Id of the season the video episode belongs to"),
    kw("episode", false, "Title of the video episode"),
    kw("episode_number", true, "Number of the video episode within a season"),
    kw("episode_id", false, "Id of the video episode"),
    kw("track", false, "Title of the track"),
    kw("track_number", true, "Number of the track within an album or a disc"),
    kw("track_id", false, "Id of the track"),
    kw("artist", false, "Artist(s) of the track"),
    kw("genre", false, "Genre(s) of the track"),
    kw("album", false, "Title of the album the track belongs to"),
    kw("album_type", false, "Type of the album"),
    kw("album_artist", false, "List of all artists appeared on the album"),
    kw("disc_number", true, "Number of the disc or other physical medium the track belongs to"),
    kw("release_year", true, "Year (YYYY) when the album was released"),
];

/// The full catalog, in reference order.
pub fn keywords() -> &'static [Keyword] {
    &KEYWORDS
}

pub fn lookup(name: &str) -> Option<&'static Keyword> {
    KEYWORDS.iter().find(|k| k.name == name)
}

/// `%(name)s`
pub fn keyword_template(name: &str) -> String {
    format!("%({name})s")
}

/// One keyword occurrence inside an output template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch {
    pub name: String,
    /// Field width of a `%(name)Nd` token.
    pub width: Option<u32>,
    pub start: usize,
    pub end: usize,
}

pub fn find_keywords(template: &str) -> Vec<KeywordMatch> {
    KEYWORD_RE
        .captures_iter(template)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(KeywordMatch {
                name: caps[1].to_string(),
                width: caps.get(2).and_then(|w| w.as_str().parse().ok()),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// Names used in `template` that are not in the catalog, in order of appearance.
pub fn unknown_keywords(template: &str) -> Vec<String> {
    find_keywords(template)
        .into_iter()
        .filter(|m| lookup(&m.name).is_none())
        .map(|m| m.name)
        .collect()
}
