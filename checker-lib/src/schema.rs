//! Fixed business schema for the two sheets of a catalogue export.
//!
//! Column rosters are plain data: every checker takes the list it needs from
//! here instead of branching on the sheet kind.

use serde::Serialize;

/// Codes accepted in the client identifier columns (`CODECLIENT`, `CLIENT`).
pub const VALID_CLIENT_CODES: &[&str] = &["FRCA", "FRCH"];

/// Spreadsheet rows holding instructions and metadata below the header.
/// Rows 2 to 6 inclusive, i.e. the first five data rows.
pub const EXCLUDED_EXCEL_ROWS: std::ops::RangeInclusive<usize> = 2..=6;

/// Offset between a data row index and the row number Excel displays
/// (1-based numbering plus the header row).
pub const EXCEL_ROW_OFFSET: usize = 2;

/// Required columns of the `Référentiel` sheet.
pub const REFERENTIEL_COLUMNS: &[&str] = &[
    "STATUTARTICLE", "DTR/NDTR", "CODECOLOR", "LIBCOLORFR", "LIBCOLOREN", "REFCOL", "REFCOLCLIENT",
    "IFLS", "EAN", "NBREF", "NBREFCO", "LIGNEDEPRODUIT", "TYPEPIECE/DIMENSION", "PACKAGING/MERCH",
    "COMPOSITION", "RECONDUIT/NOUVEAU", "IDB", "LIBZONEIMPLANTNAT", "COMMENTAIRESASSISTANT",
    "CODEIMPLANTNAT", "TYPODEMISAISON1", "TYPODEMISAISON2", "NBMAGDEMISAISON1", "NBMAGDEMISAISON2",
    "DEBUTVIE1", "FINVIE1", "DEBUTVIE2", "FINVIE2", "REFFRN", "LIBFRN", "CODEFRN", "BUREAUGS",
    "ORIGINEPRODUIT", "CODEREGROUPEMENT", "LIBREGROUPEMENT", "PABRUT", "DEVISE", "INCOTERM",
    "CYCFS", "TAUX$", "COEFAPPROCHE", "TXREMISESGLOGALES", "PCLSANSTAXE", "ROYALTIES", "TAXEDEEE",
    "NOMCP", "TAXEECO", "TAXEBOIS", "PCMFDR", "PVFORTTTCFDR", "TXMARGEIN", "ROYALTIESPROMO",
    "PCMPROMO", "PVPROMO", "NUMPACKING", "FLUXIMPLANT", "FLUXREASSORT", "FLUXPROMO",
    "NBREUNITESPARLOT", "CODECLIENT", "PVUNITAIRE", "PRESENCECATALOGUE", "PRESENCEPICKING",
    "RECAPTAILLES", "GRILLETAILLE", "TAILLE1", "TAILLE2", "TAILLE3", "TAILLE4", "TAILLE5",
    "TAILLE6", "TAILLE7", "TAILLE8", "TAILLE9", "TAILLE10", "TAILLE11", "TAILLE12", "TAILLE13",
    "TAILLE14", "TAILLE15", "TAILLE16", "TAILLE17", "TAILLE18", "TAILLE19", "TAILLE20", "TAILLE21",
    "TAILLE22", "TAILLE23", "TAILLE24", "TAILLE25", "TAILLE26", "TAILLE27", "TAILLE28", "TAILLE29",
    "TAILLE30", "TAILLE31", "TAILLE32", "TAILLE33", "TAILLE34", "TAILLE35", "TAILLE36", "TAILLE37",
    "TAILLE38", "TAILLE39", "COLLECTIONPSS", "PCBIMPLANT", "PCBPROMO", "PCBMASTERPICKING",
    "SPCBINNERPICKING", "CODEPACKINGIMPLANT", "CODEPACKINGREASSORT", "DATEOKBUYER", "DATEMAA",
    "CIRCUITDACHAT", "CODEBCOLL", "DATERELECTUREPSS", "CODEGFAMNAT", "LIBGFAMNAT", "VOLUMEIMPLANT",
    "CODEFAMNAT", "VOLUMEPICKING", "LIBFAMNAT", "CODESFAMNAT", "LIBSFAMNAT", "VOLUMEPROMO",
    "VOLUMETOTAL", "CODESFAMINT", "NUMBOX", "CODEPSS", "LIBPRODUITFR", "LIBPRODUITEN",
    "LIBELLECOURTPRODUITFR", "LIBELLECAISSEPRODUITFR", "CIBLE", "SAISON", "QUADRYPTIQUE", "MARQUE",
    "TEX RESPONSABLE", "PERSONNAGE", "FRANCHISE",
];

/// Required columns of the `Promo` sheet.
pub const PROMO_COLUMNS: &[&str] = &[
    "STATUTARTICLE", "COMMENTAIRE", "REFCOL", "CLIENT", "NOMCATA", "CPRO", "GRFAMILLE",
    "NUMEROCATA", "DEBUTCATA", "FINCATA", "NUMDISPLAY", "LIGNEDEPRODUIT", "CODEPSS",
    "LIBPRODUITFR", "MARQUE", "COLORIS", "COLORISPSS", "PVFORTTTCFDR", "LIBELLEUB", "NUMPAGEDEf",
    "NUMUBDEF", "EANMAITRE", "LIBELLEPUB", "LOGO", "LEGENDE", "EXISTEAUSSI", "PLUSPRODUIT",
    "MISEENPAGE", "UNITEDEVENTE", "TYPODEMISAISON1", "TYPODEMISAISON2", "PCBPROMO",
    "PCBMASTERPICKING", "SPCBINNERPICKING", "RECONDUIT/NOUVEAU", "TOPUB", "PHARE", "MECACATA1",
    "MAXXING", "PHOTOCATA1", "MEA_CATA", "VITESSECATA1", "POSCATA1", "REMISEPROMO", "PCMCATA1",
    "PVCATA1", "PVPROMOASAISIR", "TXREMISECATA1", "MARGECATAVAL", "MARGECATA%", "QTEESTOTALES",
    "VALEURVENTECATA", "ESTITXREVENTECATA1", "ESTIVOLUMEVENTECATA1", "ESTICACATA1", "RECEPTIONECH",
];

pub const REFERENTIEL_NUMERIC_COLUMNS: &[&str] =
    &["PCBMASTERPICKING", "SPCBINNERPICKING", "PCBPROMO", "PCBIMPLANT"];

// PCBIMPLANT is not part of the Promo layout
pub const PROMO_NUMERIC_COLUMNS: &[&str] = &["PCBMASTERPICKING", "SPCBINNERPICKING", "PCBPROMO"];

/// The two sheet roles a workbook must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SheetKind {
    #[serde(rename = "referentiel")]
    Referentiel,
    #[serde(rename = "promo")]
    Promo,
}

impl SheetKind {
    /// Report order.
    pub const ALL: [SheetKind; 2] = [SheetKind::Referentiel, SheetKind::Promo];

    /// Literal sheet name expected in the workbook.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            SheetKind::Referentiel => "Référentiel",
            SheetKind::Promo => "Promo",
        }
    }

    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            SheetKind::Referentiel => REFERENTIEL_COLUMNS,
            SheetKind::Promo => PROMO_COLUMNS,
        }
    }

    pub fn numeric_columns(&self) -> &'static [&'static str] {
        match self {
            SheetKind::Referentiel => REFERENTIEL_NUMERIC_COLUMNS,
            SheetKind::Promo => PROMO_NUMERIC_COLUMNS,
        }
    }

    /// Column marking where real data ends, also checked against
    /// [`VALID_CLIENT_CODES`].
    pub fn anchor_column(&self) -> &'static str {
        match self {
            SheetKind::Referentiel => "CODECLIENT",
            SheetKind::Promo => "CLIENT",
        }
    }
}

impl std::fmt::Display for SheetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sheet_name())
    }
}

/// Convert a 0-based data row index into the row number shown by Excel.
pub fn excel_row_number(data_row_index: usize) -> usize {
    data_row_index + EXCEL_ROW_OFFSET
}
