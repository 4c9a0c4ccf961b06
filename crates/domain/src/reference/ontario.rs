//! Ontario municipalities offered by the bulk-add picker.

pub(super) const ONTARIO_CITY_LABELS: &[&str] = &[
    "Ajax",
    "Aurora",
    "Barrie",
    "Belleville",
    "Bradford West Gwillimbury",
    "Brampton",
    "Brant",
    "Brantford",
    "Brockville",
    "Burlington",
    "Caledon",
    "Cambridge",
    "Chatham-Kent",
    "Clarington",
    "Cobourg",
    "Collingwood",
    "Cornwall",
    "East Gwillimbury",
    "Elliot Lake",
    "Fort Erie",
    "Georgina",
    "Greater Sudbury",
    "Grimsby",
    "Guelph",
    "Halton Hills",
    "Hamilton",
    "Innisfil",
    "Kawartha Lakes",
    "Kenora",
    "Kingston",
    "King",
    "Kitchener",
    "Lakeshore",
    "LaSalle",
    "Leamington",
    "Lincoln",
    "London",
    "Markham",
    "Milton",
    "Mississauga",
    "Newmarket",
    "Niagara Falls",
    "Niagara-on-the-Lake",
    "Norfolk County",
    "North Bay",
    "Oakville",
    "Orangeville",
    "Orillia",
    "Oshawa",
    "Ottawa",
    "Owen Sound",
    "Pembroke",
    "Peterborough",
    "Pickering",
    "Port Colborne",
    "Quinte West",
    "Richmond Hill",
    "Sarnia",
    "Sault Ste. Marie",
    "Scugog",
    "St. Catharines",
    "St. Thomas",
    "Stratford",
    "Tecumseh",
    "Thorold",
    "Thunder Bay",
    "Timmins",
    "Toronto",
    "Uxbridge",
    "Vaughan",
    "Welland",
    "Whitby",
    "Whitchurch-Stouffville",
    "Windsor",
    "Woodstock",
];
