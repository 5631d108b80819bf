//! The youtube-dl switch set. Field order in [`DownloadOptions::fields`] is the
//! order arguments appear on the command line; keep it stable.
use std::path::PathBuf;

use chrono::NaiveDate;

use super::assemble::{Field, OptionSet};
use super::byte_size::ByteSize;
use super::value::KeyValueMap;

const HEADER_SEPARATOR: char = ':';

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadOptions {
    // General
    pub ignore_errors: bool,
    pub abort_on_error: bool,
    pub default_search: Option<String>,
    pub ignore_config: bool,
    pub config_location: Option<PathBuf>,
    pub flat_playlist: bool,
    pub mark_watched: bool,
    pub no_color: bool,

    // Network
    pub proxy: Option<String>,
    pub socket_timeout: Option<f64>,
    pub source_address: Option<String>,
    pub force_ipv4: bool,
    pub force_ipv6: bool,

    // Geo restriction
    pub geo_verification_proxy: Option<String>,
    pub geo_bypass: bool,
    pub geo_bypass_country: Option<String>,

    // Video selection
    pub playlist_start: Option<i64>,
    pub playlist_end: Option<i64>,
    pub playlist_items: Option<String>,
    pub match_title: Option<String>,
    pub reject_title: Option<String>,
    pub max_downloads: Option<i64>,
    pub min_filesize: Option<ByteSize>,
    pub max_filesize: Option<ByteSize>,
    pub date: Option<NaiveDate>,
    pub date_before: Option<NaiveDate>,
    pub date_after: Option<NaiveDate>,
    pub min_views: Option<i64>,
    pub max_views: Option<i64>,
    pub match_filter: Option<String>,
    pub no_playlist: bool,
    pub yes_playlist: bool,
    pub age_limit: Option<i64>,
    pub download_archive: Option<PathBuf>,

    // Download
    pub limit_rate: Option<ByteSize>,
    pub retries: Option<i64>,
    pub fragment_retries: Option<i64>,
    pub skip_unavailable_fragments: bool,
    pub buffer_size: Option<ByteSize>,
    pub playlist_reverse: bool,
    pub playlist_random: bool,
    pub hls_prefer_native: bool,
    pub external_downloader: Option<String>,
    pub external_downloader_args: Option<String>,

    // Filesystem
    pub batch_file: Option<PathBuf>,
    pub output: Option<String>,
    pub autonumber_start: Option<i64>,
    pub restrict_filenames: bool,
    pub no_overwrites: bool,
    pub continue_partial: bool,
    pub no_continue: bool,
    pub no_part: bool,
    pub no_mtime: bool,
    pub write_description: bool,
    pub write_info_json: bool,
    pub write_annotations: bool,
    pub load_info_json: Option<PathBuf>,
    pub cookies: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    pub no_cache_dir: bool,

    // Thumbnails
    pub write_thumbnail: bool,
    pub write_all_thumbnails: bool,

    // Verbosity / simulation
    pub quiet: bool,
    pub no_warnings: bool,
    pub simulate: bool,
    pub skip_download: bool,
    pub get_url: bool,
    pub get_title: bool,
    pub dump_json: bool,
    pub newline: bool,
    pub no_progress: bool,
    pub verbose: bool,

    // Workarounds
    pub encoding: Option<String>,
    pub no_check_certificate: bool,
    pub prefer_insecure: bool,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    /// Rendered as `--add-header FIELD:VALUE` regardless of the map's separator.
    pub headers: KeyValueMap,
    pub sleep_interval: Option<i64>,
    pub max_sleep_interval: Option<i64>,

    // Video format
    pub format: Option<String>,
    pub all_formats: bool,
    pub prefer_free_formats: bool,
    pub list_formats: bool,
    pub merge_output_format: Option<String>,

    // Subtitles
    pub write_sub: bool,
    pub write_auto_sub: bool,
    pub all_subs: bool,
    pub sub_format: Option<String>,
    pub sub_lang: Option<String>,

    // Authentication
    pub username: Option<String>,
    pub password: Option<String>,
    pub twofactor: Option<String>,
    pub netrc: bool,
    pub video_password: Option<String>,

    // Post-processing
    pub extract_audio: bool,
    pub audio_format: Option<String>,
    pub audio_quality: Option<String>,
    pub recode_video: Option<String>,
    pub postprocessor_args: Option<String>,
    pub keep_video: bool,
    pub no_post_overwrites: bool,
    pub embed_subs: bool,
    pub embed_thumbnail: bool,
    pub add_metadata: bool,
    pub metadata_from_title: Option<String>,
    pub xattrs: bool,
    pub fixup: Option<String>,
    pub prefer_ffmpeg: bool,
    pub ffmpeg_location: Option<PathBuf>,
    pub exec: Option<String>,
    pub convert_subs: Option<String>,

    pub urls: Vec<String>,
    pub working_directory: Option<PathBuf>,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            ignore_errors: false,
            abort_on_error: false,
            default_search: None,
            ignore_config: false,
            config_location: None,
            flat_playlist: false,
            mark_watched: false,
            no_color: false,
            proxy: None,
            socket_timeout: None,
            source_address: None,
            force_ipv4: false,
            force_ipv6: false,
            geo_verification_proxy: None,
            geo_bypass: false,
            geo_bypass_country: None,
            playlist_start: None,
            playlist_end: None,
            playlist_items: None,
            match_title: None,
            reject_title: None,
            max_downloads: None,
            min_filesize: None,
            max_filesize: None,
            date: None,
            date_before: None,
            date_after: None,
            min_views: None,
            max_views: None,
            match_filter: None,
            no_playlist: false,
            yes_playlist: false,
            age_limit: None,
            download_archive: None,
            limit_rate: None,
            retries: None,
            fragment_retries: None,
            skip_unavailable_fragments: false,
            buffer_size: None,
            playlist_reverse: false,
            playlist_random: false,
            hls_prefer_native: false,
            external_downloader: None,
            external_downloader_args: None,
            batch_file: None,
            output: None,
            autonumber_start: None,
            restrict_filenames: false,
            no_overwrites: false,
            continue_partial: false,
            no_continue: false,
            no_part: false,
            no_mtime: false,
            write_description: false,
            write_info_json: false,
            write_annotations: false,
            load_info_json: None,
            cookies: None,
            cache_dir: None,
            no_cache_dir: false,
            write_thumbnail: false,
            write_all_thumbnails: false,
            quiet: false,
            no_warnings: false,
            simulate: false,
            skip_download: false,
            get_url: false,
            get_title: false,
            dump_json: false,
            newline: false,
            no_progress: false,
            verbose: false,
            encoding: None,
            no_check_certificate: false,
            prefer_insecure: false,
            user_agent: None,
            referer: None,
            headers: KeyValueMap::with_separator(HEADER_SEPARATOR),
            sleep_interval: None,
            max_sleep_interval: None,
            format: None,
            all_formats: false,
            prefer_free_formats: false,
            list_formats: false,
            merge_output_format: None,
            write_sub: false,
            write_auto_sub: false,
            all_subs: false,
            sub_format: None,
            sub_lang: None,
            username: None,
            password: None,
            twofactor: None,
            netrc: false,
            video_password: None,
            extract_audio: false,
            audio_format: None,
            audio_quality: None,
            recode_video: None,
            postprocessor_args: None,
            keep_video: false,
            no_post_overwrites: false,
            embed_subs: false,
            embed_thumbnail: false,
            add_metadata: false,
            metadata_from_title: None,
            xattrs: false,
            fixup: None,
            prefer_ffmpeg: false,
            ffmpeg_location: None,
            exec: None,
            convert_subs: None,
            urls: Vec::new(),
            working_directory: None,
        }
    }
}

impl DownloadOptions {
    pub fn for_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

impl OptionSet for DownloadOptions {
    fn fields(&self) -> Vec<Field> {
        let mut fields = vec![
            Field::working_directory(self.working_directory.clone()),
            // General
            Field::switch("--ignore-errors", self.ignore_errors),
            Field::switch("--abort-on-error", self.abort_on_error),
            Field::new("--default-search", self.default_search.clone()),
            Field::switch("--ignore-config", self.ignore_config),
            Field::new("--config-location", self.config_location.clone()),
            Field::switch("--flat-playlist", self.flat_playlist),
            Field::switch("--mark-watched", self.mark_watched),
            Field::switch("--no-color", self.no_color),
            // Network
            Field::new("--proxy", self.proxy.clone()),
            Field::new("--socket-timeout", self.socket_timeout),
            Field::new("--source-address", self.source_address.clone()),
            Field::switch("--force-ipv4", self.force_ipv4),
            Field::switch("--force-ipv6", self.force_ipv6),
            // Geo restriction
            Field::new(
                "--geo-verification-proxy",
                self.geo_verification_proxy.clone(),
            ),
            Field::switch("--geo-bypass", self.geo_bypass),
            Field::new("--geo-bypass-country", self.geo_bypass_country.clone()),
            // Video selection
            Field::new("--playlist-start", self.playlist_start),
            Field::new("--playlist-end", self.playlist_end),
            Field::new("--playlist-items", self.playlist_items.clone()),
            Field::new("--match-title", self.match_title.clone()),
            Field::new("--reject-title", self.reject_title.clone()),
            Field::new("--max-downloads", self.max_downloads),
            Field::new("--min-filesize", self.min_filesize),
            Field::new("--max-filesize", self.max_filesize),
            Field::new("--date", self.date),
            Field::new("--datebefore", self.date_before),
            Field::new("--dateafter", self.date_after),
            Field::new("--min-views", self.min_views),
            Field::new("--max-views", self.max_views),
            Field::new("--match-filter", self.match_filter.clone()),
            Field::switch("--no-playlist", self.no_playlist),
            Field::switch("--yes-playlist", self.yes_playlist),
            Field::new("--age-limit", self.age_limit),
            Field::new("--download-archive", self.download_archive.clone()),
            // Download
            Field::new("--limit-rate", self.limit_rate),
            Field::new("--retries", self.retries),
            Field::new("--fragment-retries", self.fragment_retries),
            Field::switch(
                "--skip-unavailable-fragments",
                self.skip_unavailable_fragments,
            ),
            Field::new("--buffer-size", self.buffer_size),
            Field::switch("--playlist-reverse", self.playlist_reverse),
            Field::switch("--playlist-random", self.playlist_random),
            Field::switch("--hls-prefer-native", self.hls_prefer_native),
            Field::new("--external-downloader", self.external_downloader.clone()),
            Field::new(
                "--external-downloader-args",
                self.external_downloader_args.clone(),
            ),
            // Filesystem
            Field::new("--batch-file", self.batch_file.clone()),
            Field::new("--output", self.output.clone()),
            Field::new("--autonumber-start", self.autonumber_start),
            Field::switch("--restrict-filenames", self.restrict_filenames),
            Field::switch("--no-overwrites", self.no_overwrites),
            Field::switch("--continue", self.continue_partial),
            Field::switch("--no-continue", self.no_continue),
            Field::switch("--no-part", self.no_part),
            Field::switch("--no-mtime", self.no_mtime),
            Field::switch("--write-description", self.write_description),
            Field::switch("--write-info-json", self.write_info_json),
            Field::switch("--write-annotations", self.write_annotations),
            Field::new("--load-info-json", self.load_info_json.clone()),
            Field::new("--cookies", self.cookies.clone()),
            Field::new("--cache-dir", self.cache_dir.clone()),
            Field::switch("--no-cache-dir", self.no_cache_dir),
            // Thumbnails
            Field::switch("--write-thumbnail", self.write_thumbnail),
            Field::switch("--write-all-thumbnails", self.write_all_thumbnails),
            // Verbosity / simulation
            Field::switch("--quiet", self.quiet),
            Field::switch("--no-warnings", self.no_warnings),
            Field::switch("--simulate", self.simulate),
            Field::switch("--skip-download", self.skip_download),
            Field::switch("--get-url", self.get_url),
            Field::switch("--get-title", self.get_title),
            Field::switch("--dump-json", self.dump_json),
            Field::switch("--newline", self.newline),
            Field::switch("--no-progress", self.no_progress),
            Field::switch("--verbose", self.verbose),
            // Workarounds
            Field::new("--encoding", self.encoding.clone()),
            Field::switch("--no-check-certificate", self.no_check_certificate),
            Field::switch("--prefer-insecure", self.prefer_insecure),
            Field::new("--user-agent", self.user_agent.clone()),
            Field::new("--referer", self.referer.clone()),
            // youtube-dl only accepts FIELD:VALUE, whatever map the caller assigned.
            Field::new(
                "--add-header",
                Some(self.headers.clone().separated_by(HEADER_SEPARATOR)),
            ),
            Field::new("--sleep-interval", self.sleep_interval),
            Field::new("--max-sleep-interval", self.max_sleep_interval),
            // Video format
            Field::new("--format", self.format.clone()),
            Field::switch("--all-formats", self.all_formats),
            Field::switch("--prefer-free-formats", self.prefer_free_formats),
            Field::switch("--list-formats", self.list_formats),
            Field::new("--merge-output-format", self.merge_output_format.clone()),
            // Subtitles
            Field::switch("--write-sub", self.write_sub),
            Field::switch("--write-auto-sub", self.write_auto_sub),
            Field::switch("--all-subs", self.all_subs),
            Field::new("--sub-format", self.sub_format.clone()),
            Field::new("--sub-lang", self.sub_lang.clone()),
            // Authentication
            Field::new("--username", self.username.clone()),
            Field::new("--password", self.password.clone()),
            Field::new("--twofactor", self.twofactor.clone()),
            Field::switch("--netrc", self.netrc),
            Field::new("--video-password", self.video_password.clone()),
            // Post-processing
            Field::switch("--extract-audio", self.extract_audio),
            Field::new("--audio-format", self.audio_format.clone()),
            Field::new("--audio-quality", self.audio_quality.clone()),
            Field::new("--recode-video", self.recode_video.clone()),
            Field::new("--postprocessor-args", self.postprocessor_args.clone()),
            Field::switch("--keep-video", self.keep_video),
            Field::switch("--no-post-overwrites", self.no_post_overwrites),
            Field::switch("--embed-subs", self.embed_subs),
            Field::switch("--embed-thumbnail", self.embed_thumbnail),
            Field::switch("--add-metadata", self.add_metadata),
            Field::new("--metadata-from-title", self.metadata_from_title.clone()),
            Field::switch("--xattrs", self.xattrs),
            Field::new("--fixup", self.fixup.clone()),
            Field::switch("--prefer-ffmpeg", self.prefer_ffmpeg),
            Field::new("--ffmpeg-location", self.ffmpeg_location.clone()),
            Field::new("--exec", self.exec.clone()),
            Field::new("--convert-subs", self.convert_subs.clone()),
        ];

        fields.extend(self.urls.iter().map(|u| Field::positional(u.as_str())));
        fields
    }
}
