use super::{
    comparison_frame, display_name, higher_first, or_na, ranking_level, ranking_table,
    region_level, region_name, trend_location, Branch, SeriesSummary, PROJECTION_HORIZON_YEARS,
};
use crate::chat::router::context::NarrativeContext;
use crate::text::{month_name, month_year, title_case};

const GENERIC: &str = "Berikut adalah visualisasi proyeksi tinggi muka laut. Data ini adalah perkiraan yang dapat membantu kita bersiap menghadapi masa depan.";

const LOCAL_FACTORS: &str = "Perbedaan ini dapat dipengaruhi oleh kondisi geografis lokal seperti morfologi pantai, sedimentasi, atau faktor antropogenik seperti penurunan muka tanah.";

pub(super) fn render(branch: Branch, tag: &str, context: &NarrativeContext) -> String {
    match branch {
        Branch::LocationSeries => location_series(context),
        Branch::NationalYearly => national_yearly(context),
        Branch::CompareDesa => comparison(
            "Grafik ini membandingkan proyeksi perubahan tinggi muka laut",
            "Desa",
            &context.desa1,
            &context.desa2,
            context,
        ),
        Branch::CompareProvinsi => comparison(
            "Grafik ini membandingkan proyeksi perubahan tinggi muka laut (TML)",
            "Provinsi",
            &context.provinsi1,
            &context.provinsi2,
            context,
        ),
        Branch::Trend => trend(tag, context),
        Branch::Ranking => ranking(tag, context),
        Branch::YearMap => year_map(context),
        Branch::TrendMap => trend_map(context),
        Branch::RegionYearly => region_yearly(tag, context),
        Branch::Generic => GENERIC.to_string(),
    }
}

fn location_series(context: &NarrativeContext) -> String {
    let desa = display_name(context.desa.as_deref(), "N/A");
    let Some(summary) = SeriesSummary::of(context) else {
        return format!("Maaf, data proyeksi untuk Desa {desa} tidak dapat dibuat.");
    };
    format!(
        "Ini adalah perkiraan tinggi muka laut (TML) di **Desa {desa}** untuk masa depan. Berdasarkan skenario iklim, rata-rata ketinggian air laut diperkirakan sekitar **{:.2} meter**. \
         Puncaknya diproyeksikan bisa mencapai **{:.2} meter** pada {}, dengan titik terendah sekitar **{:.2} meter**. \
         Adanya potensi rentang naik-turun air setinggi **{:.2} meter** dalam setahun memberikan gambaran kemungkinan pasang surut ekstrem yang perlu diantisipasi.",
        summary.mean,
        summary.max.sla,
        month_year(summary.max.time),
        summary.min.sla,
        summary.range(),
    )
}

fn national_yearly(context: &NarrativeContext) -> String {
    let tahun = or_na(&context.tahun);
    let Some(summary) = SeriesSummary::of(context) else {
        return format!("Data TML untuk tahun {tahun} tidak tersedia.");
    };
    format!(
        "Pada tahun **{tahun}**, proyeksi tinggi muka laut rata-rata nasional per bulan menunjukkan variasi yang cukup jelas. \
         Bulan dengan TML tertinggi adalah **bulan {}** ({:.2} meter), \
         sedangkan terendah terjadi pada bulan **{}** ({:.2} meter). \
         Secara umum, rata-rata tahunan adalah **{:.2} meter**.",
        month_name(summary.max.time),
        summary.max.sla,
        month_name(summary.min.time),
        summary.min.sla,
        summary.mean,
    )
}

fn comparison(
    opening: &str,
    level: &str,
    first: &Option<String>,
    second: &Option<String>,
    context: &NarrativeContext,
) -> String {
    let first = display_name(first.as_deref(), "A");
    let second = display_name(second.as_deref(), "B");
    let Some(frame) = comparison_frame(context) else {
        return format!("Data tidak tersedia untuk membandingkan **{first}** dan **{second}**.");
    };
    let opening = format!(
        "{opening} selama periode **2025–2100** antara **{level} {first}** dan **{level} {second}**."
    );
    let (higher, lower) = higher_first(frame, first, second);
    format!(
        "{opening}\n\n\
         Secara keseluruhan, perubahan tinggi muka laut di **{higher}** lebih tinggi dibandingkan dengan **{lower}**.\n\n\
         {LOCAL_FACTORS}"
    )
}

fn trend(tag: &str, context: &NarrativeContext) -> String {
    let Some(trend) = context.trend else {
        return "Tren proyeksi tidak dapat dihitung.".to_string();
    };
    // mm/year over the horizon, shown in metres.
    let cumulative_m = trend * PROJECTION_HORIZON_YEARS / 1000.0;
    format!(
        "{}, tren proyeksi menunjukkan potensi kenaikan permukaan air laut sebesar **{:.2} milimeter setiap tahunnya**. \
         Artinya, jika tidak ada aksi mitigasi iklim yang signifikan, dalam {} tahun ke depan permukaan air laut di wilayah ini **berpotensi bertambah tinggi sekitar {cumulative_m:.1} meter**. \
         Angka ini menjadi dasar penting bagi perencanaan jangka panjang, seperti menentukan lokasi pembangunan infrastruktur baru atau merancang sistem drainase yang tahan terhadap genangan rob di masa depan.",
        title_case(&trend_location(tag, context)),
        trend.abs(),
        PROJECTION_HORIZON_YEARS,
    )
}

fn ranking(tag: &str, context: &NarrativeContext) -> String {
    let level = ranking_level(tag, context);
    let Some(table) = ranking_table(context) else {
        return format!("Peringkat proyeksi {} tidak dapat dibuat.", level.title());
    };
    let top = &table.rows[0];
    let bottom = &table.rows[table.rows.len() - 1];
    let gap = top.mean_sla - bottom.mean_sla;
    format!(
        "Berdasarkan proyeksi, berikut adalah daftar {level_title} yang diperkirakan akan memiliki TML paling tinggi. **{}** diproyeksikan memiliki TML tertinggi, yaitu **{:.2} meter**. \
         Adanya potensi selisih yang mencapai **{gap:.2} meter** dengan {level_title} lain menunjukkan adanya potensi ketimpangan dampak perubahan iklim. Wilayah di peringkat atas ini adalah prioritas untuk program adaptasi masa depan.",
        title_case(top.name(table.level)),
        top.mean_sla,
        level_title = table.level.title(),
    )
}

fn year_map(context: &NarrativeContext) -> String {
    format!(
        "Peta ini adalah sebuah skenario atau perkiraan kondisi TML di masa depan pada tahun **{}**. Warna merah menunjukkan wilayah yang diproyeksikan memiliki permukaan air lebih tinggi dari rata-rata. \
         Wilayah perairan seperti **{}** diperkirakan akan menjadi area dengan TML yang relatif sangat tinggi. \
         Peta proyeksi seperti ini digunakan oleh para perencana dan ilmuwan untuk memodelkan dampak perubahan iklim dan merancang strategi pencegahannya.",
        or_na(&context.tahun),
        or_na(&context.region_max),
    )
}

fn trend_map(context: &NarrativeContext) -> String {
    format!(
        "Peta ini menggambarkan perkiraan laju kenaikan air laut di masa depan untuk seluruh Indonesia. Ini berfungsi sebagai 'peringatan dini' untuk menunjukkan wilayah mana yang paling berisiko. \
         Wilayah yang berwarna merah pekat, seperti di perairan **{}** (dekat Provinsi **{}**), diproyeksikan akan mengalami laju kenaikan tercepat. \
         Artinya, masyarakat dan pemerintah di daerah tersebut perlu mempersiapkan rencana adaptasi yang lebih serius, misalnya dengan membangun tanggul laut, menanam mangrove, atau merelokasi aset-aset penting ke tempat yang lebih aman.",
        or_na(&context.region_max),
        or_na(&context.prov_max),
    )
}

fn region_yearly(tag: &str, context: &NarrativeContext) -> String {
    let level = region_level(tag);
    let name = region_name(level, context);
    let Some(summary) = SeriesSummary::of(context) else {
        return format!("Data proyeksi untuk {} {name} tidak ditemukan.", level.title());
    };
    format!(
        "Pada masa depan di tahun **{}**, grafik ini memproyeksikan variasi rata-rata tinggi muka laut bulanan di **{} {name}**. \
         Puncak ketinggian air laut diperkirakan terjadi pada bulan **{}** ({:.2} m), dengan titik terendah pada **{}** ({:.2} m). \
         Rata-rata tinggi muka laut tahunan yang diproyeksikan untuk wilayah ini adalah **{:.2} meter**.",
        or_na(&context.tahun),
        level.title(),
        month_name(summary.max.time),
        summary.max.sla,
        month_name(summary.min.time),
        summary.min.sla,
        summary.mean,
    )
}
