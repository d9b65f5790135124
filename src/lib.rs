//! Reactor reboot: count the unit cubes left on after an ordered sequence
//! of cuboid on/off instructions, within the initialization region or over
//! unbounded space.

pub mod instruction {
    use core::ops::RangeInclusive;
    use std::error::Error;
    use std::fmt::{self, Display, Formatter};
    use std::str::FromStr;

    use nom::{
        branch::alt,
        bytes::complete::tag,
        character::complete::{char, digit1},
        combinator::{map, map_res, opt, recognize},
        sequence::{preceded, separated_pair, tuple},
        IResult,
    };

    #[derive(Debug)]
    pub struct BadInput(String);

    impl Display for BadInput {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            self.0.fmt(f)
        }
    }

    impl Error for BadInput {}

    #[derive(Debug, PartialEq, Eq)]
    pub struct Point(i32, i32, i32);

    impl Point {
        pub fn new(x: i32, y: i32, z: i32) -> Point {
            Point(x, y, z)
        }
    }

    /// An axis-aligned cuboid, inclusive on both ends of each axis.
    #[derive(Debug, PartialEq, Eq, Clone)]
    pub struct Range3D {
        pub x: RangeInclusive<i32>,
        pub y: RangeInclusive<i32>,
        pub z: RangeInclusive<i32>,
    }

    impl Range3D {
        pub fn contains(&self, p: &Point) -> bool {
            self.x.contains(&p.0) && self.y.contains(&p.1) && self.z.contains(&p.2)
        }
    }

    /// One reboot step: switch every cube in `cuboid` on or off.
    #[derive(Debug, PartialEq, Eq, Clone)]
    pub struct Instruction {
        pub on: bool,
        pub cuboid: Range3D,
    }

    impl Display for Instruction {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "{} x={}..{},y={}..{},z={}..{}",
                if self.on { "on" } else { "off" },
                self.cuboid.x.start(),
                self.cuboid.x.end(),
                self.cuboid.y.start(),
                self.cuboid.y.end(),
                self.cuboid.z.start(),
                self.cuboid.z.end(),
            )
        }
    }

    fn i32_parser(input: &str) -> IResult<&str, i32> {
        map_res(
            recognize(tuple((opt(char('-')), digit1))),
            FromStr::from_str,
        )(input)
    }

    // Inverted ranges (min > max) are accepted here; parsing checks shape only.
    fn parse_range(input: &str) -> IResult<&str, RangeInclusive<i32>> {
        map(
            separated_pair(i32_parser, tag(".."), i32_parser),
            |(lo, hi)| lo..=hi,
        )(input)
    }

    fn make_cuboid(
        ranges: (
            RangeInclusive<i32>,
            RangeInclusive<i32>,
            RangeInclusive<i32>,
        ),
    ) -> Range3D {
        let (x, y, z) = ranges;
        Range3D { x, y, z }
    }

    fn parse_cuboid(input: &str) -> IResult<&str, Range3D> {
        map(
            tuple((
                preceded(tag("x="), parse_range),
                preceded(tag(",y="), parse_range),
                preceded(tag(",z="), parse_range),
            )),
            make_cuboid,
        )(input)
    }

    fn parse_on_off(input: &str) -> IResult<&str, bool> {
        alt((map(tag("on"), |_| true), map(tag("off"), |_| false)))(input)
    }

    fn parse_step(input: &str) -> IResult<&str, Instruction> {
        map(
            separated_pair(parse_on_off, char(' '), parse_cuboid),
            |(on, cuboid)| Instruction { on, cuboid },
        )(input)
    }

    impl TryFrom<&str> for Instruction {
        type Error = BadInput;
        fn try_from(s: &str) -> Result<Instruction, BadInput> {
            match parse_step(s) {
                Ok(("", instruction)) => Ok(instruction),
                Ok((tail, _)) => Err(BadInput(format!("unexpected trailing junk: '{}'", tail))),
                Err(e) => Err(BadInput(format!("failed to parse '{}': {}", s, e))),
            }
        }
    }

    /// Parse one instruction per line, preserving input order.  The order is
    /// semantically significant: later instructions override earlier ones
    /// wherever they overlap.
    pub fn parse(text: &str) -> Result<Vec<Instruction>, BadInput> {
        text.lines()
            .enumerate()
            .map(|(n, line)| {
                Instruction::try_from(line)
                    .map_err(|BadInput(msg)| BadInput(format!("line {}: {}", n + 1, msg)))
            })
            .collect()
    }

    #[test]
    fn test_parse_instruction() {
        assert_eq!(
            Instruction::try_from("on x=-54112..-39298,y=-85059..-49293,z=-27449..7877").unwrap(),
            Instruction {
                on: true,
                cuboid: Range3D {
                    x: -54112..=-39298,
                    y: -85059..=-49293,
                    z: -27449..=7877,
                },
            }
        );
        assert_eq!(
            Instruction::try_from("off x=9..11,y=9..11,z=9..11").unwrap(),
            Instruction {
                on: false,
                cuboid: Range3D {
                    x: 9..=11,
                    y: 9..=11,
                    z: 9..=11,
                },
            }
        );
    }

    #[test]
    fn test_parse_accepts_inverted_range() {
        // Shape-only validation: min > max is not rejected.
        let instruction = Instruction::try_from("on x=5..1,y=0..0,z=0..0").unwrap();
        assert_eq!(instruction.cuboid.x, 5..=1);
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        assert!(Instruction::try_from("on x=1..2,y=3..4").is_err());
        assert!(Instruction::try_from("toggle x=1..2,y=3..4,z=5..6").is_err());
        assert!(Instruction::try_from("on x=1..2,y=3..4,z=5..6 extra").is_err());

        let e = parse("on x=1..2,y=3..4,z=5..6\nbanana\n")
            .expect_err("second line should not parse");
        assert!(e.to_string().contains("line 2"), "got: {}", e);
    }

    #[test]
    fn test_parse_preserves_order() {
        let steps = parse("off x=1..2,y=1..2,z=1..2\non x=3..4,y=3..4,z=3..4\n").unwrap();
        assert_eq!(steps.len(), 2);
        assert!(!steps[0].on);
        assert!(steps[1].on);
    }

    #[test]
    fn test_format_then_parse_round_trip() {
        let original = Instruction {
            on: false,
            cuboid: Range3D {
                x: -120100..=-32970,
                y: -46592..=27473,
                z: -11695..=61039,
            },
        };
        let formatted = original.to_string();
        assert_eq!(
            formatted,
            "off x=-120100..-32970,y=-46592..27473,z=-11695..61039"
        );
        assert_eq!(Instruction::try_from(formatted.as_str()).unwrap(), original);
    }
}

pub mod counter {
    use core::ops::RangeInclusive;

    use tracing::{event, Level};

    use super::instruction::{Instruction, Point, Range3D};

    /// The sorted, deduplicated edge coordinates for one axis: every
    /// instruction's min and max+1, optionally restricted to
    /// `[-bound, bound+1]`.  Consecutive edges delimit half-open cells that
    /// no instruction boundary crosses.
    fn compress_axis(
        steps: &[Instruction],
        axis: fn(&Range3D) -> &RangeInclusive<i32>,
        bound: Option<i32>,
    ) -> Vec<i32> {
        let mut edges: Vec<i32> = steps
            .iter()
            .flat_map(|step| {
                let r = axis(&step.cuboid);
                // The upper edge sits just past the inclusive bound.
                [*r.start(), *r.end() + 1]
            })
            .collect();
        if let Some(b) = bound {
            edges.retain(|edge| -b <= *edge && *edge <= b + 1);
        }
        edges.sort_unstable();
        edges.dedup();
        edges
    }

    fn cell_volume(x: &[i32], y: &[i32], z: &[i32]) -> u64 {
        (x[1] - x[0]) as u64 * (y[1] - y[0]) as u64 * (z[1] - z[0]) as u64
    }

    /// Count the cubes that are on after applying `steps` in order,
    /// restricted to `[-bound, bound+1)` on each axis if `bound` is given,
    /// otherwise over all of space.
    ///
    /// Each compressed cell lies wholly inside or wholly outside every
    /// instruction's cuboid, so its lower corner stands for the whole cell
    /// and the most recent instruction containing that corner decides the
    /// cell's final state.
    pub fn count(steps: &[Instruction], bound: Option<i32>) -> u64 {
        let x_edges = compress_axis(steps, |c: &Range3D| &c.x, bound);
        let y_edges = compress_axis(steps, |c: &Range3D| &c.y, bound);
        let z_edges = compress_axis(steps, |c: &Range3D| &c.z, bound);
        event!(
            Level::DEBUG,
            "compressed grid is {}x{}x{} cells for {} steps",
            x_edges.len().saturating_sub(1),
            y_edges.len().saturating_sub(1),
            z_edges.len().saturating_sub(1),
            steps.len(),
        );

        let mut total: u64 = 0;
        for xcell in x_edges.windows(2) {
            for ycell in y_edges.windows(2) {
                for zcell in z_edges.windows(2) {
                    let corner = Point::new(xcell[0], ycell[0], zcell[0]);
                    for step in steps.iter().rev() {
                        if step.cuboid.contains(&corner) {
                            if step.on {
                                total += cell_volume(xcell, ycell, zcell);
                            }
                            break;
                        }
                    }
                }
            }
        }
        total
    }

    /// The first-phase answer: only cubes in the initialization region
    /// `x=-50..50,y=-50..50,z=-50..50` are considered.
    pub fn count_bounded(steps: &[Instruction]) -> u64 {
        count(steps, Some(50))
    }

    #[cfg(test)]
    const SAMPLE: &str = "on x=10..12,y=10..12,z=10..12
on x=11..13,y=11..13,z=11..13
off x=9..11,y=9..11,z=9..11
on x=10..10,y=10..10,z=10..10
";

    #[test]
    fn test_compress_axis() {
        let steps = super::instruction::parse(SAMPLE).unwrap();
        assert_eq!(
            compress_axis(&steps, |c: &Range3D| &c.x, None),
            vec![9, 10, 11, 12, 13, 14]
        );
        // A bound of 10 keeps only edges in [-10, 11].
        assert_eq!(
            compress_axis(&steps, |c: &Range3D| &c.x, Some(10)),
            vec![9, 10, 11]
        );
    }

    #[test]
    fn test_count_empty() {
        assert_eq!(count(&[], None), 0);
        assert_eq!(count_bounded(&[]), 0);
    }

    #[test]
    fn test_count_sample() {
        let steps = super::instruction::parse(SAMPLE).unwrap();
        assert_eq!(count_bounded(&steps), 39);
        // Every step lies inside the initialization region, so the
        // unbounded total is the same.
        assert_eq!(count(&steps, None), 39);
    }

    #[cfg(test)]
    fn on_cube(lo: i32, hi: i32) -> Instruction {
        Instruction {
            on: true,
            cuboid: Range3D {
                x: lo..=hi,
                y: lo..=hi,
                z: lo..=hi,
            },
        }
    }

    #[cfg(test)]
    fn off_cube(lo: i32, hi: i32) -> Instruction {
        Instruction {
            on: false,
            cuboid: Range3D {
                x: lo..=hi,
                y: lo..=hi,
                z: lo..=hi,
            },
        }
    }

    #[test]
    fn test_overlapping_on_steps_count_union() {
        // Two 10x10x10 cubes overlapping in a 5x5x5 corner: the overlap
        // must not be counted twice.
        let steps = vec![on_cube(0, 9), on_cube(5, 14)];
        assert_eq!(count(&steps, None), 1000 + 1000 - 125);
    }

    #[test]
    fn test_order_of_overlapping_steps_matters() {
        let on_then_off = vec![on_cube(0, 9), off_cube(5, 14)];
        let off_then_on = vec![off_cube(5, 14), on_cube(0, 9)];
        // The later instruction wins in the 5x5x5 overlap and nowhere else.
        assert_eq!(count(&on_then_off, None), 1000 - 125);
        assert_eq!(count(&off_then_on, None), 1000);
    }

    #[test]
    fn test_bound_clips_away_distant_steps() {
        let steps = vec![on_cube(0, 9), on_cube(100, 109)];
        assert_eq!(count(&steps, None), 2000);
        assert_eq!(count_bounded(&steps), 1000);
    }

    #[cfg(test)]
    const EXAMPLE: &str = "on x=-20..26,y=-36..17,z=-47..7
on x=-20..33,y=-21..23,z=-26..28
on x=-22..28,y=-29..23,z=-38..16
on x=-46..7,y=-6..46,z=-50..-1
on x=-49..1,y=-3..46,z=-24..28
on x=2..47,y=-22..22,z=-23..27
on x=-27..23,y=-28..26,z=-21..29
on x=-39..5,y=-6..47,z=-3..44
on x=-30..21,y=-8..43,z=-13..34
on x=-22..26,y=-27..20,z=-29..19
off x=-48..-32,y=26..41,z=-47..-37
on x=-12..35,y=6..50,z=-50..-2
off x=-48..-32,y=-32..-16,z=-15..-5
on x=-18..26,y=-33..15,z=-7..46
off x=-40..-22,y=-38..-28,z=23..41
on x=-16..35,y=-41..10,z=-47..6
off x=-32..-23,y=11..30,z=-14..3
on x=-49..-5,y=-3..45,z=-29..18
off x=18..30,y=-20..-8,z=-3..13
on x=-41..9,y=-7..43,z=-33..15
on x=-54112..-39298,y=-85059..-49293,z=-27449..7877
on x=967..23432,y=45373..81175,z=27513..53682
";

    #[test]
    fn test_larger_example_bounded() {
        let steps = super::instruction::parse(EXAMPLE).unwrap();
        assert_eq!(count_bounded(&steps), 590784);
    }

    #[cfg(test)]
    const REBOOT_EXAMPLE: &str = "on x=-5..47,y=-31..22,z=-19..33
on x=-44..5,y=-27..21,z=-14..35
on x=-49..-1,y=-11..42,z=-10..38
on x=-20..34,y=-40..6,z=-44..1
off x=26..39,y=40..50,z=-2..11
on x=-41..5,y=-41..6,z=-36..8
off x=-43..-33,y=-45..-28,z=7..25
on x=-33..15,y=-32..19,z=-34..11
off x=35..47,y=-46..-34,z=-11..5
on x=-14..36,y=-6..44,z=-16..29
on x=-57795..-6158,y=29564..72030,z=20435..90618
on x=36731..105352,y=-21140..28532,z=16094..90401
on x=30999..107136,y=-53464..15513,z=8553..71215
on x=13528..83982,y=-99403..-27377,z=-24141..23996
on x=-72682..-12347,y=18159..111354,z=7391..80950
on x=-1060..80757,y=-65301..-20884,z=-103788..-16709
on x=-83015..-9461,y=-72160..-8347,z=-81239..-26856
on x=-52752..22273,y=-49450..9096,z=54442..119054
on x=-29982..40483,y=-108474..-28371,z=-24328..38471
on x=-4958..62750,y=40422..118853,z=-7672..65583
on x=55694..108686,y=-43367..46958,z=-26781..48729
on x=-98497..-18186,y=-63569..3412,z=1232..88485
on x=-726..56291,y=-62629..13224,z=18033..85226
on x=-110886..-34664,y=-81338..-8658,z=8914..63723
on x=-55829..24974,y=-16897..54165,z=-121762..-28058
on x=-65152..-11147,y=22489..91432,z=-58782..1780
on x=-120100..-32970,y=-46592..27473,z=-11695..61039
on x=-18631..37533,y=-124565..-50804,z=-35667..28308
on x=-57817..18248,y=49321..117703,z=5745..55881
on x=14781..98692,y=-1341..70827,z=15753..70151
on x=-34419..55919,y=-19626..40991,z=39015..114138
on x=-60785..11593,y=-56135..2999,z=-95368..-26915
on x=-32178..58085,y=17647..101866,z=-91405..-8878
on x=-53655..12091,y=50097..105568,z=-75335..-4862
on x=-111166..-40997,y=-71714..2688,z=5609..50954
on x=-16602..70118,y=-98693..-44401,z=5197..76897
on x=16383..101554,y=4615..83635,z=-44907..18747
off x=-95822..-15171,y=-19987..48940,z=10804..104439
on x=-89813..-14614,y=16069..88491,z=-3297..45228
on x=41075..99376,y=-20427..49978,z=-52012..13762
on x=-21330..50085,y=-17944..62733,z=-112280..-30197
on x=-16478..35915,y=36008..118594,z=-7885..47086
off x=-98156..-27851,y=-49952..43171,z=-99005..-8456
off x=2032..69770,y=-71013..4824,z=7471..94418
on x=43670..120875,y=-42068..12382,z=-24787..38892
off x=37514..111226,y=-45862..25743,z=-16714..54663
off x=25699..97951,y=-30668..59918,z=-15349..69697
off x=-44271..17935,y=-9516..60759,z=49131..112598
on x=-61695..-5813,y=40978..94975,z=8655..80240
off x=-101086..-9439,y=-7088..67543,z=33935..83858
off x=18020..114017,y=-48931..32606,z=21474..89843
off x=-77139..10506,y=-89994..-18797,z=-80..59318
off x=8476..79288,y=-75520..11602,z=-96624..-24783
on x=-47488..-1262,y=24338..100707,z=16292..72967
off x=-84341..13987,y=2429..92914,z=-90671..-1318
off x=-37810..49457,y=-71013..-7894,z=-105357..-13188
off x=-27365..46395,y=31009..98017,z=15428..76570
off x=-70369..-16548,y=22648..78696,z=-1892..86821
on x=-53470..21291,y=-120233..-33476,z=-44150..38147
off x=-93533..-4276,y=-16170..68771,z=-104985..-24507
";

    #[test]
    fn test_reboot_example_bounded() {
        let steps = super::instruction::parse(REBOOT_EXAMPLE).unwrap();
        assert_eq!(count_bounded(&steps), 474140);
    }

    #[test]
    fn test_reboot_example_unbounded() {
        let steps = super::instruction::parse(REBOOT_EXAMPLE).unwrap();
        assert_eq!(count(&steps, None), 2758514936282235);
    }
}

pub use counter::{count, count_bounded};
pub use instruction::{parse, BadInput, Instruction, Point, Range3D};
