/*!

This is the long-form manual for `rush_roster` and `rushdeck`.

## Input formats

The following formats are supported:
* `csv` Comma Separated Values export of the survey
* `xlsx` Excel workbook, as downloaded from Microsoft Forms or Google Forms

Both formats share the same column contract. Columns are located by the
header names in the first row, so the column order does not matter and extra
columns (a leading unnamed index, `Your Name`, `excitement`, timestamps) are
ignored.

| header               | required | content                                  |
|----------------------|----------|------------------------------------------|
| `Rushee Name`        | yes      | the rushee this row is about             |
| `Rushee Information` | yes      | free-text comment                        |
| `Primary`            | yes      | primary contact                          |
| `Secondary`          | no       | secondary contact                        |
| `Bucket`             | yes      | `Drop`, `Pass` or `Pull` (or empty)      |
| `Closers`            | yes      | suggested closers                        |
| `Status`             | yes      | free-text status                         |
| `Year`               | no       | class year                               |
| `Cross-Rush`         | no       | cross-rush flag                          |

Missing cells and rows shorter than the header read as empty values. A
bucket label outside the recognized set counts as no disposition and shows
up as `N/A` in the deck.

### `csv`

```text
,Rushee Name,Rushee Information,Primary,Bucket,Closers,Status
0,Alice Baker,Great energy at the BBQ,Jordan,Pull,Sam,Met twice
1,alice baker,Asked sharp questions,Casey,Pass,,
```

Both rows above land on the same slide: names are matched after trimming
and lowercasing.

### `xlsx`

The same contract, read from an Excel worksheet. If the workbook has a
single worksheet it is picked automatically; otherwise set
`excelWorksheetName` in the file source (or `--excel-worksheet-name` on the
command line). Numeric cells such as a year are rendered without a decimal
point.

## Aggregation rules

All rows naming the same rushee fold into one record:

* every non-empty comment is kept, in the order the rows appear;
* the other fields keep the first non-empty value and are never replaced;
* the bucket is resolved by `rules.bucketPolicy`:
  * `ordinalMax` (default): the maximum under `None < Drop < Pass < Pull`;
  * `firstNonEmpty`: the first label that is not empty/unknown.

## Configuration

`rushdeck` runs without any configuration file, looking for
`rush_responses.xlsx`, a `rushee_images/` directory and writing
`presentation.html` in the current directory. A JSON configuration file
makes all of this explicit; paths inside it are relative to the file itself.

```json
{
  "outputSettings": {
    "deckTitle": "Fall Rush 2025",
    "outputPath": "presentation.html",
    "summaryPath": null,
    "theme": "black",
    "transition": "slide"
  },
  "responseSources": [
    { "provider": "csv", "filePath": "rush_responses.csv" }
  ],
  "imageSettings": { "directory": "rushee_images", "defaultImage": "default.jpg" },
  "rules": { "bucketPolicy": "ordinalMax", "dropHandling": "exclude" }
}
```

Notes on the fields:

- `outputSettings.theme` (string, optional): one of the stylesheets
  reveal.js ships under `assets/css/theme/`: `beige`, `black`, `blood`,
  `league`, `moon`, `night`, `serif`, `simple`, `sky`, `solarized` or
  `white`. Defaults to `black`.
- `outputSettings.transition` (string, optional): one of `none`, `fade`,
  `slide`, `convex`, `concave`, `zoom`. Defaults to `slide`.
- `responseSources` (array): several sources are read in order and their
  rows aggregated together.
- `responseSources[].columns` (object, optional): renames the expected
  headers, for surveys that used different wording. For example
  `{"rusheeName": "Candidate", "rusheeInformation": "Notes"}`.
- `rules.dropHandling` (string, optional): `exclude` (default) leaves
  rushees bucketed `Drop` out of the deck; `include` renders them like
  everyone else. Excluded rushees still appear in the summary with
  `included: false`.

## Photos

Each slide looks for a photo named after the rushee in the image directory:
the name is trimmed, lowercased and internal spaces become underscores, so
`Alice Baker` matches `alice_baker.jpg`, `.jpeg` or `.png` (probed in that
order). When nothing matches, `defaultImage` is used. The deck references
image files by path; nothing is copied or resized.

 */
