use std::collections::HashSet;

use crate::models::Timestamp;

/// U.S. federal holidays, actual and observed dates, packed as `YYYYMMDD`.
///
/// An exhaustive enumeration for 1999-2025; no recurrence rule is applied,
/// so dates outside this range are never holidays.
pub const US_FEDERAL_HOLIDAYS: [i32; 296] = [
    // 1999
    19991231,
    // 2000
    20000101, 20000117, 20000221, 20000529, 20000704, 20000904,
    20001009, 20001110, 20001111, 20001123, 20001225,
    // 2001
    20010101, 20010115, 20010219, 20010528, 20010704, 20010903,
    20011008, 20011111, 20011112, 20011122, 20011225,
    // 2002
    20020101, 20020121, 20020218, 20020527, 20020704, 20020902,
    20021014, 20021111, 20021128, 20021225,
    // 2003
    20030101, 20030120, 20030217, 20030526, 20030704, 20030901,
    20031013, 20031111, 20031127, 20031225,
    // 2004
    20040101, 20040119, 20040216, 20040531, 20040704, 20040705,
    20040906, 20041011, 20041111, 20041125, 20041224, 20041225,
    20041231,
    // 2005
    20050101, 20050117, 20050221, 20050530, 20050704, 20050905,
    20051010, 20051111, 20051124, 20051225, 20051226,
    // 2006
    20060101, 20060102, 20060116, 20060220, 20060529, 20060704,
    20060904, 20061009, 20061110, 20061111, 20061123, 20061225,
    // 2007
    20070101, 20070115, 20070219, 20070528, 20070704, 20070903,
    20071008, 20071111, 20071112, 20071122, 20071225,
    // 2008
    20080101, 20080121, 20080218, 20080526, 20080704, 20080901,
    20081013, 20081111, 20081127, 20081225,
    // 2009
    20090101, 20090119, 20090216, 20090525, 20090703, 20090704,
    20090907, 20091012, 20091111, 20091126, 20091225,
    // 2010
    20100101, 20100118, 20100215, 20100531, 20100704, 20100705,
    20100906, 20101011, 20101111, 20101125, 20101224, 20101225,
    20101231,
    // 2011
    20110101, 20110117, 20110221, 20110530, 20110704, 20110905,
    20111010, 20111111, 20111124, 20111225, 20111226,
    // 2012
    20120101, 20120102, 20120116, 20120220, 20120528, 20120704,
    20120903, 20121008, 20121111, 20121112, 20121122, 20121225,
    // 2013
    20130101, 20130121, 20130218, 20130527, 20130704, 20130902,
    20131014, 20131111, 20131128, 20131225,
    // 2014
    20140101, 20140120, 20140217, 20140526, 20140704, 20140901,
    20141013, 20141111, 20141127, 20141225,
    // 2015
    20150101, 20150119, 20150216, 20150525, 20150703, 20150704,
    20150907, 20151012, 20151111, 20151126, 20151225,
    // 2016
    20160101, 20160118, 20160215, 20160530, 20160704, 20160905,
    20161010, 20161111, 20161124, 20161225, 20161226,
    // 2017
    20170101, 20170102, 20170116, 20170220, 20170529, 20170704,
    20170904, 20171009, 20171110, 20171111, 20171123, 20171225,
    // 2018
    20180101, 20180115, 20180219, 20180528, 20180704, 20180903,
    20181008, 20181111, 20181112, 20181122, 20181225,
    // 2019
    20190101, 20190121, 20190218, 20190527, 20190704, 20190902,
    20191014, 20191111, 20191128, 20191225,
    // 2020
    20200101, 20200120, 20200217, 20200525, 20200703, 20200704,
    20200907, 20201012, 20201111, 20201126, 20201225,
    // 2021
    20210101, 20210118, 20210215, 20210531, 20210618, 20210619,
    20210704, 20210705, 20210906, 20211011, 20211111, 20211125,
    20211224, 20211225, 20211231,
    // 2022
    20220101, 20220117, 20220221, 20220530, 20220619, 20220620,
    20220704, 20220905, 20221010, 20221111, 20221124, 20221225,
    20221226,
    // 2023
    20230101, 20230102, 20230116, 20230220, 20230529, 20230619,
    20230704, 20230904, 20231009, 20231110, 20231111, 20231123,
    20231225,
    // 2024
    20240101, 20240115, 20240219, 20240527, 20240619, 20240704,
    20240902, 20241014, 20241111, 20241128, 20241225,
    // 2025
    20250101, 20250120, 20250217, 20250526, 20250619, 20250704,
    20250901, 20251013, 20251111, 20251127, 20251225,
];

/// Immutable exact-date holiday lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCalendar {
    dates: HashSet<i32>,
}

impl HolidayCalendar {
    pub fn from_packed_dates(dates: &[i32]) -> Self {
        Self {
            dates: dates.iter().copied().collect(),
        }
    }

    pub fn us_federal() -> Self {
        Self::from_packed_dates(&US_FEDERAL_HOLIDAYS)
    }

    pub fn contains_packed(&self, packed_date: i32) -> bool {
        self.dates.contains(&packed_date)
    }

    pub fn is_holiday(&self, timestamp: &Timestamp) -> bool {
        self.contains_packed(timestamp.packed_date())
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        Self::us_federal()
    }
}
