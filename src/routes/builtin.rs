//! Built-in route-key table.

use crate::domain::IndexFamily;

pub(super) const VERSION: &str = "builtin";

type Routes = &'static [(&'static str, Option<&'static str>)];

pub(super) const ENTRIES: &[(IndexFamily, Routes)] = &[
    (
        IndexFamily::Kcci,
        &[
            ("종합지수", Some("KCCI_Composite_Index")),
            ("미주서안", Some("KCCI_US_West_Coast")),
            ("미주동안", Some("KCCI_US_East_Coast")),
            ("유럽", Some("KCCI_Europe")),
            ("지중해", Some("KCCI_Mediterranean")),
            ("중동", Some("KCCI_Middle_East")),
            ("호주", Some("KCCI_Australia")),
            ("남미동안", Some("KCCI_South_America_East_Coast")),
            ("남미서안", Some("KCCI_South_America_West_Coast")),
            ("남아프리카", Some("KCCI_South_Africa")),
            ("서아프리카", Some("KCCI_West_Africa")),
            ("중국", Some("KCCI_China")),
            ("일본", Some("KCCI_Japan")),
            ("동남아시아", Some("KCCI_Southeast_Asia")),
        ],
    ),
    (
        IndexFamily::Scfi,
        &[
            ("종합지수", Some("SCFI_Composite_Index")),
            ("미주서안", Some("SCFI_US_West_Coast")),
            ("미주동안", Some("SCFI_US_East_Coast")),
            ("북유럽", Some("SCFI_North_Europe")),
            ("지중해", Some("SCFI_Mediterranean")),
            ("동남아시아", Some("SCFI_Southeast_Asia")),
            ("중동", Some("SCFI_Middle_East")),
            ("호주/뉴질랜드", Some("SCFI_Australia_New_Zealand")),
            ("남아메리카", Some("SCFI_South_America")),
            ("일본서안", Some("SCFI_Japan_West_Coast")),
            ("일본동안", Some("SCFI_Japan_East_Coast")),
            ("한국", Some("SCFI_Korea")),
            ("동부/서부 아프리카", Some("SCFI_East_West_Africa")),
            ("남아공", Some("SCFI_South_Africa")),
        ],
    ),
    (
        IndexFamily::Wci,
        &[
            ("종합지수", Some("WCI_Composite_Index")),
            ("상하이 → 로테르담", Some("WCI_Shanghai_Rotterdam")),
            ("로테르담 → 상하이", Some("WCI_Rotterdam_Shanghai")),
            ("상하이 → 제노바", Some("WCI_Shanghai_Genoa")),
            ("상하이 → 로스엔젤레스", Some("WCI_Shanghai_to_Los_Angeles")),
            ("로스엔젤레스 → 상하이", Some("WCI_Los_Angeles_to_Shanghai")),
            ("상하이 → 뉴욕", Some("WCI_Shanghai_New_York")),
            ("뉴욕 → 로테르담", Some("WCI_New_York_Rotterdam")),
            ("로테르담 → 뉴욕", Some("WCI_Rotterdam_New_York")),
        ],
    ),
    (IndexFamily::Iaci, &[("종합지수", Some("IACI_Composite_Index"))]),
    (
        IndexFamily::BlankSailing,
        &[
            ("Gemini Cooperation", Some("BLANK_SAILING_Gemini_Cooperation")),
            ("MSC", Some("BLANK_SAILING_MSC")),
            ("OCEAN Alliance", Some("BLANK_SAILING_OCEAN_Alliance")),
            ("Premier Alliance", Some("BLANK_SAILING_Premier_Alliance")),
            ("Others/Independent", Some("BLANK_SAILING_Others_Independent")),
            ("Total", Some("BLANK_SAILING_Total")),
        ],
    ),
    (
        IndexFamily::Fbx,
        &[
            ("종합지수", Some("FBX_Composite_Index")),
            ("중국/동아시아 → 미주서안", Some("FBX_China_EA_US_West_Coast")),
            ("미주서안 → 중국/동아시아", Some("FBX_US_West_Coast_China_EA")),
            ("중국/동아시아 → 미주동안", Some("FBX_China_EA_US_East_Coast")),
            ("미주동안 → 중국/동아시아", Some("FBX_US_East_Coast_China_EA")),
            ("중국/동아시아 → 북유럽", Some("FBX_China_EA_North_Europe")),
            ("북유럽 → 중국/동아시아", Some("FBX_North_Europe_China_EA")),
            ("중국/동아시아 → 지중해", Some("FBX_China_EA_Mediterranean")),
            ("지중해 → 중국/동아시아", Some("FBX_Mediterranean_China_EA")),
            ("미주동안 → 북유럽", Some("FBX_US_East_Coast_North_Europe")),
            ("북유럽 → 미주동안", Some("FBX_North_Europe_US_East_Coast")),
            ("유럽 → 남미동안", Some("FBX_Europe_South_America_East_Coast")),
            ("유럽 → 남미서안", Some("FBX_Europe_South_America_West_Coast")),
        ],
    ),
    (
        IndexFamily::Xsi,
        &[
            ("동아시아 → 북유럽", Some("XSI_East_Asia_North_Europe")),
            ("북유럽 → 동아시아", Some("XSI_North_Europe_East_Asia")),
            ("동아시아 → 미주서안", Some("XSI_East_Asia_US_West_Coast")),
            ("미주서안 → 동아시아", Some("XSI_US_West_Coast_East_Asia")),
            ("동아시아 → 남미동안", Some("XSI_East_Asia_South_America_East_Coast")),
            ("북유럽 → 미주동안", Some("XSI_North_Europe_US_East_Coast")),
            ("미주동안 → 북유럽", Some("XSI_US_East_Coast_North_Europe")),
            ("북유럽 → 남미동안", Some("XSI_North_Europe_South_America_East_Coast")),
        ],
    ),
    (IndexFamily::Mbci, &[("MBCI", Some("MBCI_Value"))]),
];
