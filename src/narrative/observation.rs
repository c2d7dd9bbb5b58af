use super::{
    comparison_frame, display_name, higher_first, or_na, ranking_level, ranking_table,
    region_level, region_name, trend_location, Branch, SeriesSummary, OBSERVATION_HORIZON_YEARS,
};
use crate::chat::router::context::NarrativeContext;
use crate::text::{month_name, month_year, title_case};

const GENERIC: &str = "Berikut adalah visualisasi data tinggi muka laut yang diminta. Grafik ini dapat membantu Anda memahami kondisi di wilayah tersebut.";

const LOCAL_FACTORS: &str = "Perbedaan ini dapat dipengaruhi oleh kondisi geografis lokal seperti morfologi pantai, sedimentasi, atau faktor antropogenik seperti penurunan muka tanah.";

pub(super) fn render(branch: Branch, tag: &str, context: &NarrativeContext) -> String {
    match branch {
        Branch::LocationSeries => location_series(context),
        Branch::NationalYearly => national_yearly(context),
        Branch::CompareDesa => comparison("Desa", &context.desa1, &context.desa2, context),
        Branch::CompareProvinsi => {
            comparison("Provinsi", &context.provinsi1, &context.provinsi2, context)
        }
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
        return format!("Maaf, data untuk Desa {desa} tidak dapat ditemukan.");
    };
    format!(
        "Grafik ini menunjukkan catatan tinggi muka laut (TML) di **Desa {desa}**. Sepanjang periode yang diamati, rata-rata ketinggian air laut adalah **{:.2} meter**. \
         Ketinggian air laut pernah mencapai puncaknya di **{:.2} meter** pada bulan {}, dan titik terendahnya di **{:.2} meter** pada {}. \
         Adanya rentang naik-turun air setinggi **{:.2} meter** dalam setahun menunjukkan adanya pengaruh musim yang kuat, seperti musim angin barat dan timur, yang wajar terjadi di wilayah pesisir.",
        summary.mean,
        summary.max.sla,
        month_year(summary.max.time),
        summary.min.sla,
        month_year(summary.min.time),
        summary.range(),
    )
}

fn national_yearly(context: &NarrativeContext) -> String {
    let tahun = or_na(&context.tahun);
    let Some(summary) = SeriesSummary::of(context) else {
        return format!("Data TML untuk tahun {tahun} tidak tersedia.");
    };
    format!(
        "Pada tahun **{tahun}**, tinggi muka laut rata-rata nasional per bulan menunjukkan variasi yang cukup jelas. \
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
        "Grafik ini membandingkan perubahan tinggi muka laut (TML) selama periode **1993–2023** antara **{level} {first}** dan **{level} {second}**."
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
        return "Tren tidak dapat dihitung.".to_string();
    };
    // mm/year over the horizon, shown in centimetres.
    let cumulative_cm = trend * OBSERVATION_HORIZON_YEARS / 10.0;
    format!(
        "{}, tercatat ada tren kenaikan permukaan air laut sekitar **{:.2} milimeter setiap tahun**. \
         Ini berarti dalam {} tahun terakhir, permukaan air laut di wilayah ini telah bertambah tinggi sekitar **{cumulative_cm:.1} centimeter**. \
         Kenaikan yang terus-menerus ini menjadi alasan utama mengapa genangan air pasang (rob) bisa menjadi lebih sering atau lebih luas dari tahun ke tahun, sehingga perlu menjadi perhatian bagi warga dan pemerintah setempat.",
        title_case(&trend_location(tag, context)),
        trend.abs(),
        OBSERVATION_HORIZON_YEARS,
    )
}

fn ranking(tag: &str, context: &NarrativeContext) -> String {
    let level = ranking_level(tag, context);
    let Some(table) = ranking_table(context) else {
        return format!("Peringkat {} tidak dapat dibuat.", level.title());
    };
    let top = &table.rows[0];
    let average = table.mean_of_values().unwrap_or(top.mean_sla);
    format!(
        "Berikut adalah daftar {level_title} dengan rata-rata TML paling tinggi di Indonesia. **{}** tercatat sebagai wilayah dengan TML tertinggi, yaitu **{:.2} meter**. \
         Sebagai perbandingan, rata-rata TML dari semua wilayah di daftar ini adalah **{average:.2} meter**. {level_title} yang berada di peringkat atas secara alami lebih rentan terhadap dampak naiknya air laut, seperti abrasi dan intrusi air asin ke sumur warga.",
        title_case(top.name(table.level)),
        top.mean_sla,
        level_title = table.level.title(),
    )
}

fn year_map(context: &NarrativeContext) -> String {
    format!(
        "Peta ini seperti foto satelit yang menunjukkan kondisi TML pada tahun **{}**. Warna merah berarti permukaan airnya sedikit lebih tinggi dari rata-rata, sedangkan biru lebih rendah. \
         Kita bisa lihat ada pola tertentu, di mana perairan seperti **{}** cenderung 'menggembung' atau memiliki permukaan yang lebih tinggi. \
         Hal ini bisa disebabkan oleh banyak faktor, termasuk suhu air laut yang lebih hangat di wilayah tersebut atau karena pengaruh arus laut.",
        or_na(&context.tahun),
        or_na(&context.region_max),
    )
}

fn trend_map(context: &NarrativeContext) -> String {
    format!(
        "Peta ini adalah potret laju kenaikan air laut di seluruh perairan Indonesia. Warna merah menunjukkan laju kenaikan yang lebih cepat, sementara warna biru menunjukkan laju yang lebih lambat atau stabil. \
         Dapat dilihat bahwa beberapa wilayah, seperti perairan di sekitar **{}** (dekat Provinsi **{}**), menjadi 'hotspot' atau titik panas dengan laju kenaikan tercepat. \
         Informasi ini sangat penting bagi pemerintah untuk memprioritaskan wilayah mana yang paling mendesak untuk mendapatkan program perlindungan pantai dan adaptasi masyarakat.",
        or_na(&context.region_max),
        or_na(&context.prov_max),
    )
}

fn region_yearly(tag: &str, context: &NarrativeContext) -> String {
    let level = region_level(tag);
    let name = region_name(level, context);
    let Some(summary) = SeriesSummary::of(context) else {
        return format!("Data untuk {} {name} tidak ditemukan.", level.title());
    };
    format!(
        "Grafik ini menunjukkan variasi rata-rata tinggi muka laut bulanan di **{} {name}** selama tahun **{}**. \
         Puncak ketinggian air laut terjadi pada bulan **{}** ({:.2} m), sedangkan titik terendah terjadi pada **{}** ({:.2} m). \
         Rata-rata tinggi muka laut tahunan untuk seluruh wilayah ini adalah **{:.2} meter**.",
        level.title(),
        or_na(&context.tahun),
        month_name(summary.max.time),
        summary.max.sla,
        month_name(summary.min.time),
        summary.min.sla,
        summary.mean,
    )
}
