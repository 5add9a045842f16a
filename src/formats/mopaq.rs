//! MPQ game data archive (MoPaQ).

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Parsed MPQ archive.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Archive {
    pub user_data: Option<UserData>,
    pub archive_header: Option<ArchiveHeader>,
    pub het_table: Option<HetTable>,
    pub bet_table: Option<BetTable>,
    pub hash_table: Option<Vec<Option<HashEntry>>>,
    pub block_table: Option<Vec<Option<BlockEntry>>>,
    pub hi_block_table: Option<Vec<i16>>,
}

/// Optional user data block preceding the archive header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserData {
    pub signature: Option<String>,
    pub user_data_size: Option<u32>,
    pub header_offset: Option<u32>,
    pub user_data_header_size: Option<u32>,
}

/// Archive header. Fields past the block table size only exist in newer
/// format versions and arrive absent otherwise.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArchiveHeader {
    pub signature: Option<String>,
    pub header_size: Option<u32>,
    pub archive_size: Option<u32>,
    pub format_version: Option<u16>,
    pub block_size: Option<u16>,
    pub hash_table_position: Option<u32>,
    pub block_table_position: Option<u32>,
    pub hash_table_size: Option<u32>,
    pub block_table_size: Option<u32>,
    pub hi_block_table_position: Option<u64>,
    pub hash_table_position_hi: Option<u16>,
    pub block_table_position_hi: Option<u16>,
    pub archive_size_long: Option<u64>,
    pub bet_table_position: Option<u64>,
    pub het_table_position: Option<u64>,
    pub hash_table_size_long: Option<u64>,
    pub block_table_size_long: Option<u64>,
    pub hi_block_table_size: Option<u64>,
    pub het_table_size: Option<u64>,
    pub bet_table_size: Option<u64>,
    pub raw_chunk_size: Option<u32>,
    pub block_table_md5: Option<Vec<u8>>,
    pub hash_table_md5: Option<Vec<u8>>,
    pub hi_block_table_md5: Option<Vec<u8>>,
    pub bet_table_md5: Option<Vec<u8>>,
    pub het_table_md5: Option<Vec<u8>>,
    pub mpq_header_md5: Option<Vec<u8>>,
}

/// HET table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HetTable {
    pub signature: Option<String>,
    pub version: Option<u32>,
    pub data_size: Option<u32>,
    pub table_size: Option<u32>,
    pub max_file_count: Option<u32>,
    pub hash_table_size: Option<u32>,
    pub hash_entry_size: Option<u32>,
    pub total_index_size: Option<u32>,
    pub index_size_extra: Option<u32>,
    pub index_size: Option<u32>,
    pub block_table_size: Option<u32>,
    pub hash_table: Option<Vec<u8>>,
    pub file_indexes: Option<Vec<Option<Vec<u8>>>>,
}

/// BET table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BetTable {
    pub signature: Option<String>,
    pub version: Option<u32>,
    pub data_size: Option<u32>,
    pub table_size: Option<u32>,
    pub file_count: Option<u32>,
    pub unknown: Option<u32>,
    pub table_entry_size: Option<u32>,
    pub file_position_bit_index: Option<u32>,
    pub file_size_bit_index: Option<u32>,
    pub compressed_size_bit_index: Option<u32>,
    pub flag_index_bit_index: Option<u32>,
    pub unknown_bit_index: Option<u32>,
    pub file_position_bit_count: Option<u32>,
    pub file_size_bit_count: Option<u32>,
    pub compressed_size_bit_count: Option<u32>,
    pub flag_index_bit_count: Option<u32>,
    pub unknown_bit_count: Option<u32>,
    pub total_bet_hash_size: Option<u32>,
    pub bet_hash_size_extra: Option<u32>,
    pub bet_hash_size: Option<u32>,
    pub bet_hash_array_size: Option<u32>,
    pub flag_count: Option<u32>,
    pub flags_array: Option<Vec<u32>>,
}

/// One hash table entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HashEntry {
    pub name_hash_part_a: Option<u32>,
    pub name_hash_part_b: Option<u32>,
    pub locale: Option<u16>,
    pub platform: Option<u16>,
    pub block_index: Option<u32>,
}

/// One block table entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BlockEntry {
    pub file_position: Option<u32>,
    pub compressed_size: Option<u32>,
    pub uncompressed_size: Option<u32>,
    pub flags: Option<u32>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::MoPaQ(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::MoPaQ(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render an MPQ report.
pub fn print(report: &mut Report, archive: &Archive) {
    report.title("MoPaQ Archive Information:");
    report.blank();

    print_user_data(report, archive.user_data.as_ref());
    print_archive_header(report, archive.archive_header.as_ref());
    print_het_table(report, archive.het_table.as_ref());
    print_bet_table(report, archive.bet_table.as_ref());
    print_hash_table(report, archive.hash_table.as_deref());
    print_block_table(report, archive.block_table.as_deref());
    print_hi_block_table(report, archive.hi_block_table.as_deref());
}

fn print_user_data(report: &mut Report, user_data: Option<&UserData>) {
    report.section("  User Data Information:");
    let Some(user_data) = user_data else {
        report.line("  No user data");
        report.blank();
        return;
    };

    report.field_str("  Signature", user_data.signature.as_deref());
    report.field_num("  User data size", user_data.user_data_size);
    report.field_num("  Header offset", user_data.header_offset);
    report.field_num("  User data header size", user_data.user_data_header_size);
    report.blank();
}

fn print_archive_header(report: &mut Report, header: Option<&ArchiveHeader>) {
    report.section("  Archive Header Information:");
    let Some(header) = header else {
        report.line("  No archive header");
        report.blank();
        return;
    };

    report.field_str("  Signature", header.signature.as_deref());
    report.field_num("  Header size", header.header_size);
    report.field_num("  Archive size", header.archive_size);
    report.field_num("  Format version", header.format_version);
    report.field_num("  Block size", header.block_size);
    report.field_num("  Hash table position", header.hash_table_position);
    report.field_num("  Block table position", header.block_table_position);
    report.field_num("  Hash table size", header.hash_table_size);
    report.field_num("  Block table size", header.block_table_size);
    report.field_num("  Hi-block table position", header.hi_block_table_position);
    report.field_num("  Hash table position hi", header.hash_table_position_hi);
    report.field_num("  Block table position hi", header.block_table_position_hi);
    report.field_num("  Archive size long", header.archive_size_long);
    report.field_num("  BET table position", header.bet_table_position);
    report.field_num("  HET table position", header.het_table_position);
    report.field_num("  Hash table size long", header.hash_table_size_long);
    report.field_num("  Block table size long", header.block_table_size_long);
    report.field_num("  Hi-block table size", header.hi_block_table_size);
    report.field_num("  HET table size", header.het_table_size);
    report.field_num("  BET table size", header.bet_table_size);
    report.field_num("  Raw chunk size", header.raw_chunk_size);
    report.field_bytes("  Block table MD5", header.block_table_md5.as_deref());
    report.field_bytes("  Hash table MD5", header.hash_table_md5.as_deref());
    report.field_bytes("  Hi-block table MD5", header.hi_block_table_md5.as_deref());
    report.field_bytes("  BET table MD5", header.bet_table_md5.as_deref());
    report.field_bytes("  HET table MD5", header.het_table_md5.as_deref());
    report.field_bytes("  MPQ header MD5", header.mpq_header_md5.as_deref());
    report.blank();
}

fn print_het_table(report: &mut Report, table: Option<&HetTable>) {
    report.section("  HET Table Information:");
    let Some(table) = table else {
        report.line("  No HET table");
        report.blank();
        return;
    };

    report.field_str("  Signature", table.signature.as_deref());
    report.field_num("  Version", table.version);
    report.field_num("  Data size", table.data_size);
    report.field_num("  Table size", table.table_size);
    report.field_num("  Max file count", table.max_file_count);
    report.field_num("  Hash table size", table.hash_table_size);
    report.field_num("  Hash entry size", table.hash_entry_size);
    report.field_num("  Total index size", table.total_index_size);
    report.field_num("  Index size extra", table.index_size_extra);
    report.field_num("  Index size", table.index_size);
    report.field_num("  Block table size", table.block_table_size);
    report.field_bytes("  Hash table", table.hash_table.as_deref());

    report.section("  File indexes:");
    match table.file_indexes.as_deref() {
        None => report.line("  No file indexes"),
        Some(indexes) => {
            for (i, index) in indexes.iter().enumerate() {
                report.field_bytes(&format!("    File index {i}"), index.as_deref());
            }
        }
    }
    report.blank();
}

fn print_bet_table(report: &mut Report, table: Option<&BetTable>) {
    report.section("  BET Table Information:");
    let Some(table) = table else {
        report.line("  No BET table");
        report.blank();
        return;
    };

    report.field_str("  Signature", table.signature.as_deref());
    report.field_num("  Version", table.version);
    report.field_num("  Data size", table.data_size);
    report.field_num("  Table size", table.table_size);
    report.field_num("  File count", table.file_count);
    report.field_num("  Unknown", table.unknown);
    report.field_num("  Table entry size", table.table_entry_size);
    report.field_num("  File position bit index", table.file_position_bit_index);
    report.field_num("  File size bit index", table.file_size_bit_index);
    report.field_num("  Compressed size bit index", table.compressed_size_bit_index);
    report.field_num("  Flag index bit index", table.flag_index_bit_index);
    report.field_num("  Unknown bit index", table.unknown_bit_index);
    report.field_num("  File position bit count", table.file_position_bit_count);
    report.field_num("  File size bit count", table.file_size_bit_count);
    report.field_num("  Compressed size bit count", table.compressed_size_bit_count);
    report.field_num("  Flag index bit count", table.flag_index_bit_count);
    report.field_num("  Unknown bit count", table.unknown_bit_count);
    report.field_num("  Total BET hash size", table.total_bet_hash_size);
    report.field_num("  BET hash size extra", table.bet_hash_size_extra);
    report.field_num("  BET hash size", table.bet_hash_size);
    report.field_num("  BET hash array size", table.bet_hash_array_size);
    report.field_num("  Flag count", table.flag_count);
    report.field_array("  Flags array", table.flags_array.as_deref());
    report.blank();
}

fn print_hash_table(report: &mut Report, entries: Option<&[Option<HashEntry>]>) {
    report.section("  Hash Table Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No hash table items");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Hash Table Entry {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Name hash, part A", entry.name_hash_part_a);
        report.field_num("    Name hash, part B", entry.name_hash_part_b);
        report.field_num("    Locale", entry.locale);
        report.field_num("    Platform", entry.platform);
        report.field_num("    Block index", entry.block_index);
    }
    report.blank();
}

fn print_block_table(report: &mut Report, entries: Option<&[Option<BlockEntry>]>) {
    report.section("  Block Table Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No block table items");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Block Table Entry {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    File position", entry.file_position);
        report.field_num("    Compressed size", entry.compressed_size);
        report.field_num("    Uncompressed size", entry.uncompressed_size);
        report.field_num("    Flags", entry.flags);
    }
    report.blank();
}

fn print_hi_block_table(report: &mut Report, entries: Option<&[i16]>) {
    report.section("  Hi-block Table Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No hi-block table items");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Hi-block Table Entry {i}: {entry}"));
    }
    report.blank();
}
