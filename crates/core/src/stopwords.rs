//! Fixed vocabularies for subject matching: Indonesian stop-words and the
//! acronym allow-list. All entries are uppercase.

use std::collections::HashSet;

pub const STOP_WORDS: &[&str] = &[
    // Conjunctions, prepositions, particles.
    "ADA",
    "ADALAH",
    "AGAR",
    "AKAN",
    "ANTARA",
    "ANTAR",
    "ATAS",
    "ATAU",
    "BAGAI",
    "BAGAIMANA",
    "BAGI",
    "BAHWA",
    "BAIK",
    "BANYAK",
    "BARU",
    "BEBERAPA",
    "BELUM",
    "BERBAGAI",
    "BERDASARKAN",
    "BERSAMA",
    "BESERTA",
    "BUKAN",
    "DALAM",
    "DAN",
    "DAPAT",
    "DARI",
    "DARIPADA",
    "DEMI",
    "DENGAN",
    "DI",
    "DIA",
    "DIANTARA",
    "ENAM",
    "HAL",
    "HANYA",
    "HARUS",
    "HINGGA",
    "IALAH",
    "INI",
    "ITU",
    "JADI",
    "JIKA",
    "JUGA",
    "KAMI",
    "KARENA",
    "KE",
    "KECUALI",
    "KEDUA",
    "KEMUDIAN",
    "KEPADA",
    "KETIKA",
    "KITA",
    "LAGI",
    "LAIN",
    "LAINNYA",
    "LALU",
    "LEBIH",
    "MAKA",
    "MASIH",
    "MELALUI",
    "MELAINKAN",
    "MENGENAI",
    "MENJADI",
    "MENURUT",
    "MEREKA",
    "MILIK",
    "MULAI",
    "NAMUN",
    "OLEH",
    "PADA",
    "PARA",
    "PERTAMA",
    "SAAT",
    "SAJA",
    "SAMA",
    "SAMPAI",
    "SANGAT",
    "SEBAGAI",
    "SEBAGAIMANA",
    "SEBELUM",
    "SEBUAH",
    "SECARA",
    "SEDANG",
    "SEHINGGA",
    "SEJAK",
    "SEKITAR",
    "SELAIN",
    "SELAMA",
    "SELURUH",
    "SEMUA",
    "SEPERTI",
    "SERTA",
    "SESUAI",
    "SETELAH",
    "SETIAP",
    "SUATU",
    "SUDAH",
    "TANPA",
    "TELAH",
    "TENTANG",
    "TERHADAP",
    "TERMASUK",
    "TETAPI",
    "TIDAK",
    "UNTUK",
    "YAITU",
    "YAKNI",
    "YANG",
    // Numbers and time words.
    "SATU",
    "DUA",
    "TIGA",
    "EMPAT",
    "LIMA",
    "TUJUH",
    "DELAPAN",
    "SEMBILAN",
    "SEPULUH",
    "TAHUN",
    "PERIODE",
    "BULAN",
    "HARI",
    "TRIWULAN",
    "SEMESTER",
    "KUARTAL",
    // Research boilerplate.
    "ANALISA",
    "ANALISIS",
    "ASPEK",
    "DAMPAK",
    "DATA",
    "DETERMINAN",
    "EFEKTIVITAS",
    "EFEK",
    "EVALUASI",
    "EMPIRIS",
    "FAKTOR",
    "FAKTORFAKTOR",
    "GAMBARAN",
    "HUBUNGAN",
    "IDENTIFIKASI",
    "IMPLEMENTASI",
    "IMPLIKASI",
    "KAJIAN",
    "KASUS",
    "KONTRIBUSI",
    "KORELASI",
    "MEDIASI",
    "METODE",
    "METODOLOGI",
    "MODEL",
    "MODERASI",
    "OBJEK",
    "OPTIMALISASI",
    "PENDEKATAN",
    "PENELITIAN",
    "PENERAPAN",
    "PENGARUH",
    "PENGEMBANGAN",
    "PENGUJIAN",
    "PERAN",
    "PERANAN",
    "PERBANDINGAN",
    "PERSEPSI",
    "PREDIKSI",
    "SKRIPSI",
    "STUDI",
    "SURVEI",
    "SURVEY",
    "TESIS",
    "DISERTASI",
    "TINJAUAN",
    "TUGAS",
    "AKHIR",
    "UJI",
    "VARIABEL",
    "INTERVENING",
    "MODERATING",
    "PARSIAL",
    "SIMULTAN",
    "SIGNIFIKAN",
    "KUANTITATIF",
    "KUALITATIF",
    "DESKRIPTIF",
    "EKSPLORATIF",
    "KOMPARATIF",
    "REGRESI",
    "LINIER",
    "LINEAR",
    "BERGANDA",
    "SAMPEL",
    "POPULASI",
    "RESPONDEN",
    "KUESIONER",
    "WAWANCARA",
    "OBSERVASI",
    "HASIL",
    "TINGKAT",
    "UPAYA",
    "STRATEGI",
    "SISTEM",
    "PROSES",
    "KONDISI",
    "BERPENGARUH",
    "MEMPENGARUHI",
    "DIPENGARUHI",
    "MENGANALISIS",
    "DIGUNAKAN",
    "MENGGUNAKAN",
    "TERDAFTAR",
    "TERKAIT",
    "KHUSUS",
    "UMUM",
    // Institutional and place filler.
    "PT",
    "TBK",
    "PERSERO",
    "CV",
    "KOTA",
    "KABUPATEN",
    "KECAMATAN",
    "DESA",
    "KELURAHAN",
    "PROVINSI",
    "INDONESIA",
    "WILAYAH",
    "DAERAH",
    "KANTOR",
    "CABANG",
    "UNIT",
    "DINAS",
    "BADAN",
    "LEMBAGA",
    "UNIVERSITAS",
    "FAKULTAS",
    "JURUSAN",
    "PROGRAM",
    "SEKOLAH",
    "MAHASISWA",
    "SISWA",
    "MASYARAKAT",
    "STUDY",
    // English filler seen in bilingual titles.
    "THE",
    "AND",
    "FOR",
    "FROM",
    "WITH",
    "ANALYSIS",
    "EFFECT",
    "EFFECTS",
    "IMPACT",
    "INFLUENCE",
    "CASE",
    "ON",
    "OF",
    "IN",
    "AT",
    "TO",
    "BY",
];

/// Short domain abbreviations that are kept regardless of the length and
/// stop-word filters. Mostly financial ratios.
pub const ACRONYMS: &[&str] = &[
    "CAR", "LDR", "NPL", "NPF", "ROA", "ROE", "ROI", "BOPO", "NIM", "DER", "DAR", "EPS", "PER",
    "PBV", "CSR", "GCG", "FDR", "OJK", "BEI", "IHSG", "IPO", "UMKM", "UKM", "BUMN", "BUMD",
    "BPR", "BPRS", "SDM", "MSDM", "PAD", "APBD", "APBN", "PPH", "PPN", "SPT", "NPWP", "ZIS",
    "TATO", "NPM", "GPM", "OPM", "MVA", "ERP", "TQM", "KPI",
];

pub fn stop_word_set(extra: &[String]) -> HashSet<String> {
    STOP_WORDS
        .iter()
        .map(|w| w.to_string())
        .chain(extra.iter().map(|w| w.trim().to_uppercase()))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Built-in acronyms followed by configured ones, deduplicated, order kept.
pub fn acronym_list(extra: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    ACRONYMS
        .iter()
        .map(|a| a.to_string())
        .chain(extra.iter().map(|a| a.trim().to_uppercase()))
        .filter(|a| !a.is_empty() && seen.insert(a.clone()))
        .collect()
}
