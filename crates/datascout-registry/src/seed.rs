//! Built-in list of well-known intrusion-detection datasets

use datascout_domain::{DatasetEntry, DatasetId};

/// The datasets a fresh registry starts with
pub fn builtin_entries() -> Vec<DatasetEntry> {
    [
        (
            1,
            "KITSUNE",
            "Yisroel Mirsky, Tomer Doitshman, Yuval Elovici, Asaf Shabtai",
            "https://www.ndss-symposium.org/wp-content/uploads/2018/02/ndss2018_03A-3_Mirsky_paper.pdf",
        ),
        (
            2,
            "NSL-KDD",
            "GhulamMohi-ud-din",
            "https://dx.doi.org/10.21227/425a-3e55",
        ),
        (
            3,
            "UNSW-NB15",
            "Moustafa, Nour, and Jill Slay",
            "https://research.unsw.edu.au/projects/unsw-nb15-dataset",
        ),
        (
            4,
            "CICIDS2017",
            "Iman Sharafaldin, Arash Habibi Lashkari, and Ali A. Ghorbani",
            "https://www.unb.ca/cic/datasets/ids-2017.html",
        ),
        (
            5,
            "BoT-IoT dataset",
            "Nickolaos Koroniotis, Nour Moustafa, Elena Sitnikova, Benjamin Turnbull",
            "https://research.unsw.edu.au/projects/bot-iot-dataset",
        ),
    ]
    .into_iter()
    .map(|(id, name, authors, link)| DatasetEntry {
        unique_id: DatasetId::new(id),
        dataset_name: name.to_string(),
        authors: authors.to_string(),
        doi_or_link: link.to_string(),
    })
    .collect()
}
